// src/launch/mod.rs

//! Launch descriptors: what to run, where, and with which classpath.
//!
//! - [`descriptor`] defines [`LaunchDescriptor`] and the argument tokenizer.
//! - [`builder`] assembles a descriptor from configuration, resolving the
//!   launcher's dependency closure on the way.

pub mod builder;
pub mod descriptor;

pub use builder::{DescriptorBuilder, LaunchPlan, DEBUG_ARG, WINDOWS_TERMINAL_JVM_ARG};
pub use descriptor::{split_arguments, LaunchDescriptor, SystemPropertyValue, CANNED_INPUT};
