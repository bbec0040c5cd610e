use balc_parser::Parser;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// A medium-size module (~100 lines) touching most of the grammar
const BALLERINA_SOURCE: &str = r#"
import ballerina/http;
import ballerina/log;

# A customer record.
# + id - unique id
# + name - display name
type Customer record {|
    readonly int id;
    string name;
    string email?;
    decimal balance = 0;
|};

type CustomerTable table<Customer> key(id);

configurable int port = 9090;
final CustomerTable customers = table [];

enum Status {
    ACTIVE,
    SUSPENDED = "suspended",
    CLOSED
}

public isolated function totalBalance(Customer[] list) returns decimal {
    decimal total = 0;
    foreach Customer c in list {
        total += c.balance;
    }
    return total;
}

function classify(int score) returns string {
    match score {
        0 => {
            return "none";
        }
        1 | 2 | 3 => {
            return "low";
        }
        var s if s > 100 => {
            return "high";
        }
        _ => {
            return "medium";
        }
    }
}

function shifts(int a, int b) returns int {
    int x = a >> 2;
    int y = b >>> 1;
    int z = (a << 3) | (x & y);
    return z ?: 0;
}

function destructure() returns error? {
    [int, string] pair = [1, "one"];
    [int, string] [n, label] = pair;
    var {name, email} = check lookup(1);
    [n, label] = [2, "two"];
    Customer[] rich = from var c in customers
        where c.balance > 1000
        order by c.name ascending
        limit 10
        select c;
    log:printInfo("rich customers", count = rich.length());
}

isolated client class Repository {
    private final map<Customer> cache = {};

    remote function get(int id) returns Customer|error {
        lock {
            Customer? c = self.cache[id.toString()];
            if c is Customer {
                return c;
            }
        }
        return error("not found", id = id);
    }
}

service /customers on new http:Listener(port) {
    resource function get [int id]() returns Customer|http:NotFound {
        Customer? c = customers[id];
        if c is () {
            return http:NOT_FOUND;
        }
        return c;
    }

    resource function post .(Customer c) returns error? {
        customers.add(c);
        worker audit {
            log:printInfo("added");
        }
    }
}
"#;

fn bench_parse_module(c: &mut Criterion) {
    c.bench_function("parse_module_medium", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(BALLERINA_SOURCE));
            let tree = parser.parse_compilation_unit();
            black_box(tree);
        });
    });
}

fn bench_parse_broken_module(c: &mut Criterion) {
    let broken = BALLERINA_SOURCE.replace(';', "");
    c.bench_function("parse_module_without_semicolons", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(&broken));
            let tree = parser.parse_compilation_unit();
            black_box(tree);
        });
    });
}

criterion_group!(benches, bench_parse_module, bench_parse_broken_module);
criterion_main!(benches);
