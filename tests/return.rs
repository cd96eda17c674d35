#[macro_use]
mod common;

#[cfg(test)]
mod _return {
    tests! {
        after_if in return is OK
        "early"
    }

    tests! {
        return_nil in return is OK
        "nil"
    }

    tests! {
        in_while in return is OK
        "loop"
    }

    tests! {
        at_top_level in return is ERR
        "[line 1] Error (at 'return'): Cannot return from top-level code"
    }
}
