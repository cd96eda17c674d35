#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        literals in number is OK
        "123"
        "987654"
        "0"
        "123.456"
        "0.5"
    }

    tests! {
        decimal_display in number is OK
        "1"
        "2.5"
        "100"
    }

    tests! {
        trailing_dot in number is ERR
        "[line 1] Error (at ';'): Expected property name after '.'"
    }
}
