//! Platform address transition stubs
//!
//! These six transitions are allow-listed so they stay selectable, but the
//! console cannot execute them. They fail before any SDK call.

use crate::dispatch::{DispatchError, handler_table};

const NOT_IMPLEMENTED: &str =
    "Platform address transitions are not implemented in this console.";

handler_table!(TRANSITIONS, {
    "addressCreate" => address_create(_ctx) {
        Err(DispatchError::Unimplemented(NOT_IMPLEMENTED))
    }
    "addressTopUp" => address_top_up(_ctx) {
        Err(DispatchError::Unimplemented(NOT_IMPLEMENTED))
    }
    "addressWithdraw" => address_withdraw(_ctx) {
        Err(DispatchError::Unimplemented(NOT_IMPLEMENTED))
    }
    "addressTransfer" => address_transfer(_ctx) {
        Err(DispatchError::Unimplemented(NOT_IMPLEMENTED))
    }
    "addressFreeze" => address_freeze(_ctx) {
        Err(DispatchError::Unimplemented(NOT_IMPLEMENTED))
    }
    "addressUnfreeze" => address_unfreeze(_ctx) {
        Err(DispatchError::Unimplemented(NOT_IMPLEMENTED))
    }
});
