#[macro_use]
mod common;

#[cfg(test)]
mod comment {
    tests! {
        line_comment in comment is OK
        "ok"
    }

    tests! {
        block_comment in comment is OK
        "one"
        "two"
        "three"
    }

    tests! {
        line_count in comment is ERR
        "Undefined variable 'unknown'"
        "[line 3]"
    }

    tests! {
        unterminated in comment is ERR
        "[line 3] Error (): Unterminated comment"
    }

    tests! {
        division_still_works in comment is OK
        "4"
    }
}
