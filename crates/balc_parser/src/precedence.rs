//! Operator precedence for binary operators and actions.

use balc_syntax::SyntaxKind;

/// Operator precedence levels, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Default = 0,
    /// `from ... select`, `from ... do`.
    Query = 1,
    /// `start`, `wait`, `trap` and friends in action position.
    Action = 2,
    /// `a->b()`, `a -> w`, `a ->> w`.
    RemoteCallAction = 3,
    AnonFuncOrLet = 4,
    Conditional = 5,
    Elvis = 6,
    LogicalOr = 7,
    LogicalAnd = 8,
    BitwiseOr = 9,
    BitwiseXor = 10,
    BitwiseAnd = 11,
    Equality = 12,
    /// `<`, `>`, `<=`, `>=`, `is`.
    BinaryCompare = 13,
    /// `...`, `..<`.
    Range = 14,
    Shift = 15,
    Additive = 16,
    Multiplicative = 17,
    Unary = 18,
    /// `.`, `?.`, `[...]`, calls, xml steps.
    MemberAccess = 19,
}

impl OperatorPrecedence {
    pub fn is_higher_than_or_equal(self, other: OperatorPrecedence) -> bool {
        self >= other
    }

    /// The level right-hand operands of a right-associative operator at this
    /// level are parsed at.
    pub fn looser(self) -> OperatorPrecedence {
        use OperatorPrecedence::*;
        match self {
            Default | Query => Default,
            Action => Query,
            RemoteCallAction => Action,
            AnonFuncOrLet => RemoteCallAction,
            Conditional => AnonFuncOrLet,
            Elvis => Conditional,
            LogicalOr => Elvis,
            LogicalAnd => LogicalOr,
            BitwiseOr => LogicalAnd,
            BitwiseXor => BitwiseOr,
            BitwiseAnd => BitwiseXor,
            Equality => BitwiseAnd,
            BinaryCompare => Equality,
            Range => BinaryCompare,
            Shift => Range,
            Additive => Shift,
            Multiplicative => Additive,
            Unary => Multiplicative,
            MemberAccess => Unary,
        }
    }

    /// Whether operators at this level produce actions rather than
    /// expressions.
    pub fn is_action(self) -> bool {
        matches!(
            self,
            OperatorPrecedence::RemoteCallAction | OperatorPrecedence::Action
        )
    }
}

/// Precedence of a token in infix position. `>` is reported at the compare
/// level; the caller upgrades `> >` to shift after looking ahead.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> Option<OperatorPrecedence> {
    let precedence = match kind {
        SyntaxKind::DotToken
        | SyntaxKind::OptionalChainingToken
        | SyntaxKind::OpenBracketToken
        | SyntaxKind::OpenParenToken => OperatorPrecedence::MemberAccess,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::DoubleLtToken | SyntaxKind::DoubleGtToken | SyntaxKind::TripleGtToken => {
            OperatorPrecedence::Shift
        }
        SyntaxKind::EllipsisToken | SyntaxKind::DoubleDotLtToken => OperatorPrecedence::Range,
        SyntaxKind::LtToken
        | SyntaxKind::GtToken
        | SyntaxKind::LtEqualToken
        | SyntaxKind::GtEqualToken
        | SyntaxKind::IsKeyword => OperatorPrecedence::BinaryCompare,
        SyntaxKind::DoubleEqualToken
        | SyntaxKind::NotEqualToken
        | SyntaxKind::TripleEqualToken
        | SyntaxKind::NotDoubleEqualToken => OperatorPrecedence::Equality,
        SyntaxKind::BitwiseAndToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::BitwiseXorToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::PipeToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::LogicalAndToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::LogicalOrToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::ElvisToken => OperatorPrecedence::Elvis,
        SyntaxKind::QuestionMarkToken => OperatorPrecedence::Conditional,
        SyntaxKind::RightArrowToken | SyntaxKind::SyncSendToken => OperatorPrecedence::RemoteCallAction,
        _ => return None,
    };
    Some(precedence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(OperatorPrecedence::MemberAccess > OperatorPrecedence::Unary);
        assert!(OperatorPrecedence::Multiplicative > OperatorPrecedence::Additive);
        assert!(OperatorPrecedence::Elvis > OperatorPrecedence::Conditional);
        assert!(OperatorPrecedence::Query > OperatorPrecedence::Default);
        assert!(OperatorPrecedence::Additive.is_higher_than_or_equal(OperatorPrecedence::Additive));
    }

    #[test]
    fn test_looser_steps_down_one_level() {
        assert_eq!(OperatorPrecedence::Elvis.looser(), OperatorPrecedence::Conditional);
        assert_eq!(OperatorPrecedence::MemberAccess.looser(), OperatorPrecedence::Unary);
        assert_eq!(OperatorPrecedence::Default.looser(), OperatorPrecedence::Default);
    }

    #[test]
    fn test_operator_lookup() {
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::AsteriskToken),
            Some(OperatorPrecedence::Multiplicative)
        );
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::IsKeyword),
            Some(OperatorPrecedence::BinaryCompare)
        );
        assert_eq!(get_binary_operator_precedence(SyntaxKind::SemicolonToken), None);
    }
}
