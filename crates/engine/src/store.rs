//! The resource gateway seam.
//!
//! [`Store`] is the engine's only view of the remote data store. Implementations
//! are stateless request/response adapters: they never cache, so every call sees
//! the store as it is at that moment.

use std::future::Future;

use api_types::{
    Id,
    category::{Category, CategoryNew},
    operation::{Operation, OperationNew},
    user::User,
};

use crate::{Filter, GatewayError};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// CRUD over `/operations`, `/categories` and `/users`.
pub trait Store: Send + Sync {
    /// `GET /operations` constrained by `filter` (see [`Filter::query`]).
    fn list_operations(
        &self,
        filter: &Filter,
    ) -> impl Future<Output = GatewayResult<Vec<Operation>>> + Send;

    fn create_operation(
        &self,
        payload: &OperationNew,
    ) -> impl Future<Output = GatewayResult<Operation>> + Send;

    /// Full replacement of an existing operation.
    fn update_operation(
        &self,
        id: &Id,
        payload: &OperationNew,
    ) -> impl Future<Output = GatewayResult<Operation>> + Send;

    fn remove_operation(&self, id: &Id) -> impl Future<Output = GatewayResult<()>> + Send;

    fn list_categories(&self) -> impl Future<Output = GatewayResult<Vec<Category>>> + Send;

    fn create_category(
        &self,
        payload: &CategoryNew,
    ) -> impl Future<Output = GatewayResult<Category>> + Send;

    fn update_category(
        &self,
        id: &Id,
        payload: &CategoryNew,
    ) -> impl Future<Output = GatewayResult<Category>> + Send;

    fn remove_category(&self, id: &Id) -> impl Future<Output = GatewayResult<()>> + Send;

    fn list_users(&self) -> impl Future<Output = GatewayResult<Vec<User>>> + Send;
}
