#[macro_use]
mod common;

#[cfg(test)]
mod ternary {
    tests! {
        basic in ternary is OK
        "yes"
        "no"
    }

    tests! {
        precedence in ternary is OK
        "math"
        "1"
    }

    tests! {
        nested in ternary is OK
        "b"
        "b"
        "c"
    }

    tests! {
        short_circuit in ternary is OK
        "first"
        "1"
        "second"
        "2"
    }

    tests! {
        condition_truthiness in ternary is OK
        "falsey"
        "truthy"
        "truthy"
    }

    tests! {
        missing_colon in ternary is ERR
        "[line 1] Error (at ';'): Expected ':' in the ternary '?:' operator"
    }
}
