//! Form rendering and value collection
//!
//! The form layer is headless: [`FormModel`] is what the renderer would draw
//! (one control per schema input, in declared order), [`FormState`] is the
//! live value and visibility state, and [`collect_args`] turns the two into
//! the positional argument list the dispatcher consumes. Dynamic fields
//! delegate to handlers registered in a [`DynamicRegistry`].

pub mod collect;
pub mod dynamic;
pub mod model;
pub mod state;

pub use collect::{CollectError, CollectedArgs, collect_args};
pub use dynamic::{
    ContestedResourceHandler, DocumentFieldsHandler, DynamicHandler, DynamicRegistry, NoopHandler,
};
pub use model::{ControlKind, FormModel, RenderedControl};
pub use state::{ControlValue, FormState};
