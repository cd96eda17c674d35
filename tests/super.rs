#[macro_use]
mod common;

#[cfg(test)]
mod _super {
    tests! {
        call_super_method in super is OK
        "A"
        "B"
    }

    tests! {
        super_in_inherited_method in super is OK
        "A"
    }

    tests! {
        bound_super_method in super is OK
        "A.hello"
    }

    tests! {
        no_superclass in super is ERR
        "[line 3] Error (at 'super'): Cannot use 'super' in a class with no superclass"
    }

    tests! {
        outside_class in super is ERR
        "[line 1] Error (at 'super'): Cannot use 'super' outside of a class"
    }

    tests! {
        undefined_method in super is ERR
        "Undefined property 'missing'"
        "[line 4]"
    }

    tests! {
        super_without_dot in super is ERR
        "[line 4] Error (at ';'): Expected '.' after 'super'"
    }
}
