#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add in operator is OK
        "3"
        "string"
    }

    tests! {
        arithmetic in operator is OK
        "4"
        "12"
        "3"
        "3.5"
        "-2"
    }

    tests! {
        add_mixed in operator is ERR
        "Operands must be two numbers or two strings."
        "[line 1]"
    }

    tests! {
        subtract_strings in operator is ERR
        "Operands must be numbers"
        "[line 1]"
    }

    tests! {
        negate in operator is OK
        "-3"
        "3"
        "-3"
    }

    tests! {
        negate_string in operator is ERR
        "Operand must be a number"
        "[line 1]"
    }

    tests! {
        comparison in operator is OK
        "true"
        "true"
        "false"
        "true"
    }

    tests! {
        compare_strings in operator is ERR
        "Operands must be numbers"
        "[line 1]"
    }

    tests! {
        equality in operator is OK
        "true"
        "false"
        "true"
        "true"
        "false"
        "true"
        "false"
        "false"
        "true"
    }

    tests! {
        division_by_zero in operator is OK
        "inf"
    }
}
