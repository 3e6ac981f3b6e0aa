//! # gallery-service
//!
//! Application layer: the comment interaction engine, its dependency
//! container, and the request/response DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
mod testing;

pub use services::{
    CommentService, IdentityService, ReactionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, VoteService,
};
