// No-op stand-ins for the `log` macros when the `log` feature is disabled. The
// arguments are still evaluated inside `if false` so that call sites keep
// type-checking and don't trigger unused-variable warnings.

#[allow(unused_macros)]
macro_rules! debug {
    ( $( $e:expr ),* $(,)* ) => {
        if false {
            $(
                let _ = $e;
            )*
        }
    }
}

#[allow(unused_macros)]
macro_rules! trace {
    ( $( $e:expr ),* $(,)* ) => {
        if false {
            $(
                let _ = $e;
            )*
        }
    }
}

#[allow(unused_macros)]
macro_rules! warn {
    ( $( $e:expr ),* $(,)* ) => {
        if false {
            $(
                let _ = $e;
            )*
        }
    }
}
