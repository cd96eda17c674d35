#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        counting in for is OK
        "0"
        "1"
        "2"
    }

    tests! {
        existing_variable in for is OK
        "0"
        "1"
        "2"
    }

    tests! {
        no_clauses in for is OK
        "once"
    }

    tests! {
        scope in for is OK
        "inner"
    }

    tests! {
        closure_in_body in for is OK
        "1"
    }
}
