//! # HookRelay Core
//!
//! This crate provides the domain logic for HookRelay, a service that
//! receives GitHub push webhooks and selectively triggers downstream
//! continuous-delivery pipelines based on which files the push touched.
//!
//! ## Overview
//!
//! Handling one delivery is a single linear flow:
//!
//! 1. Parse the raw body as a push payload
//! 2. Validate the delivery: target branch, required headers, HMAC-SHA256
//!    signature, event type
//! 3. Union the added, removed, and modified paths of every commit into the
//!    touched file set
//! 4. Select every pipeline whose configured pattern matches a touched path
//! 5. Attempt to trigger each selected pipeline exactly once, collecting
//!    failures instead of aborting on the first one
//!
//! A delivery either fails validation early (no pipelines are attempted) or
//! proceeds to attempt every selected pipeline; partial success is a valid
//! terminal outcome, not a rollback scenario.
//!
//! ## Architecture
//!
//! The crate is pure domain logic with two injected boundaries:
//!
//! - [`config_manager::WebhookConfig`]: immutable configuration built once
//!   at process startup
//! - [`pipeline_client::PipelineTrigger`]: the downstream trigger
//!   collaborator, kept behind a trait so the HTTP transport never leaks
//!   into the handler
//!
//! The HTTP surface (routing, status codes, response bodies) lives in the
//! `hook_relay_api` crate.

mod handler;
mod payload;
mod request;
mod selection;
pub mod signature;
mod validation;

pub use handler::{TriggerFailure, TriggerReport, TriggerRequest, WebhookHandler};
pub use payload::{PushCommit, PushEvent};
pub use request::{
    WebhookRequest, HEADER_DELIVERY, HEADER_EVENT, HEADER_SIGNATURE,
};
pub use selection::select_pipelines;
pub use validation::{validate, ValidationError, PUSH_EVENT};
