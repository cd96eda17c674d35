#[macro_use]
mod common;

#[cfg(test)]
mod _if {
    tests! {
        branches in if is OK
        "then"
        "else"
        "math"
    }

    tests! {
        truthiness in if is OK
        "nil falsey"
        "zero truthy"
        "empty truthy"
    }

    tests! {
        dangling_else in if is OK
        "dangling"
    }

    tests! {
        no_else in if is OK
        "after"
    }
}
