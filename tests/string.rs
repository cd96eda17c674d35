#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literals in string is OK
        "a string"
        ""
        "123"
    }

    tests! {
        multiline in string is OK
        "one"
        "two"
    }

    tests! {
        concatenation in string is OK
        "abcdef"
    }

    tests! {
        unterminated in string is ERR
        "[line 1] Error (): Unterminated string"
    }
}
