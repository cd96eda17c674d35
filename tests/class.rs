#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        print_class in class is OK
        "<class Slab>"
    }

    tests! {
        instantiate in class is OK
        "<Slab instance>"
    }

    tests! {
        methods in class is OK
        "hello"
    }

    tests! {
        refer_to_own_name in class is OK
        "<Maker instance>"
    }
}
