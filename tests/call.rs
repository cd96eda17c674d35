#[macro_use]
mod common;

#[cfg(test)]
mod call {
    tests! {
        non_callable_number in call is ERR
        "Non-callable called"
        "[line 1]"
    }

    tests! {
        non_callable_string in call is ERR
        "Non-callable called"
        "[line 1]"
    }

    tests! {
        non_callable_nil in call is ERR
        "Non-callable called"
        "[line 1]"
    }

    tests! {
        instance_not_callable in call is ERR
        "Non-callable called"
        "[line 2]"
    }

    tests! {
        callables in call is OK
        "fn"
        "<C instance>"
    }
}
