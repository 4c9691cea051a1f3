//! Row models.
//!
//! Each submodule contains `FromRow` + `Serialize` structs matching the
//! columns its repository selects, and the accessor-trait impls that let
//! `memorial_core` shape them without knowing the concrete types.

pub mod award;
pub mod comment;
pub mod connection;
pub mod fallen;
pub mod media;
pub mod memory;
pub mod profile;
pub mod timeline;
