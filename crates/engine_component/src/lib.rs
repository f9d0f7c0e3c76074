//! # engine_component
//!
//! The "E" and "C" in ECS: what an entity handle is and what a component is.
//!
//! This crate provides:
//!
//! - [`Component`] trait: the contract all ECS data must satisfy.
//! - [`Entity`]: generation-counted `u64` entity handles.
//! - [`EntityAllocator`]: slot allocator with a free list.
//! - [`KindIndex`]: dense per-type index assigned on first use.
//! - [`ComponentTypeId`]: name-derived kind identity for data leaving the process.
//! - [`QueryDescriptor`]: the ordered kind list of a conjunctive query.

pub mod component;
pub mod entity;
pub mod kind;
pub mod query;

pub use component::{Component, ComponentRecord, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use kind::KindIndex;
pub use query::QueryDescriptor;
