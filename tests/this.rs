#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        in_method in this is OK
        "<Egotist instance>"
    }

    tests! {
        in_nested_function in this is OK
        "outer label"
    }

    tests! {
        outside_class in this is ERR
        "[line 1] Error (at 'this'): Cannot use 'this' outside of a class"
    }

    tests! {
        in_top_level_function in this is ERR
        "[line 2] Error (at 'this'): Cannot use 'this' outside of a class"
    }
}
