#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        print_function in function is OK
        "<fn named>"
    }

    tests! {
        parameters in function is OK
        "6"
    }

    tests! {
        no_return_returns_nil in function is OK
        "nil"
    }

    tests! {
        recursion in function is OK
        "55"
    }

    tests! {
        local_function in function is OK
        "inner"
    }

    tests! {
        missing_arguments in function is ERR
        "Expected 2 arguments but got 1"
        "[line 2]"
    }

    tests! {
        extra_arguments in function is ERR
        "Expected 2 arguments but got 4"
        "[line 2]"
    }

    tests! {
        duplicate_parameter in function is ERR
        "[line 1] Error (at 'arg'): A variable 'arg' is already in this scope"
    }

    tests! {
        native_clock in function is OK
        "true"
        "<native fn>"
    }
}
