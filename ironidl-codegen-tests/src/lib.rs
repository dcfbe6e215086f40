//! Code generated from the fixture schemas by `build.rs`.
//!
//! Each unit is included as a sibling module so the `super::` imports the
//! generator emits resolve the same way they do under the generated `mod.rs`.

/// The tutorial schema, including a service whose function names shadow
/// the generated client's own methods.
pub mod tutorial {
    #[allow(dead_code, clippy::all)]
    pub mod types {
        include!(concat!(env!("OUT_DIR"), "/tutorial/types.rs"));
    }

    #[allow(dead_code, clippy::all)]
    pub mod constants {
        include!(concat!(env!("OUT_DIR"), "/tutorial/constants.rs"));
    }

    #[allow(dead_code, clippy::all)]
    pub mod shared_service {
        include!(concat!(env!("OUT_DIR"), "/tutorial/shared_service.rs"));
    }

    #[allow(dead_code, clippy::all)]
    pub mod calculator {
        include!(concat!(env!("OUT_DIR"), "/tutorial/calculator.rs"));
    }

    #[allow(dead_code, clippy::all)]
    pub mod scientific_calculator {
        include!(concat!(env!("OUT_DIR"), "/tutorial/scientific_calculator.rs"));
    }

    #[allow(dead_code, clippy::all)]
    pub mod factory {
        include!(concat!(env!("OUT_DIR"), "/tutorial/factory.rs"));
    }
}
