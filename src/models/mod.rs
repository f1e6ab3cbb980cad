//! Persisted record types.
//!
//! Every entity carries a create shape (bound from POST bodies) and a patch shape
//! (bound from PUT bodies). Patches merge into the stored record: fields left out
//! of the body keep their current value.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

pub mod category;
pub mod inquiry;
pub mod inventory;
pub mod product;
pub mod supplier;
pub mod user;

pub use category::{Category, CategoryPatch, NewCategory};
pub use inquiry::{Inquiry, InquiryPatch, NewInquiry};
pub use inventory::{InventoryItem, InventoryItemPatch, NewInventoryItem};
pub use product::{NewProduct, Product, ProductPatch};
pub use supplier::{NewSupplier, Supplier, SupplierPatch};
pub use user::{NewUser, User, UserPatch};

/// Behaviour shared by all resource types.
pub trait Entity: Clone + Serialize + Send + Sync + Unpin + 'static {
    /// Human-readable name used in messages ("Product not found").
    const NAME: &'static str;
    /// Path segment under `/api`.
    const COLLECTION: &'static str;
    /// Whether DELETE only marks the row with `deleted_at`.
    const SOFT_DELETE: bool;

    type Create: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;

    fn id(&self) -> i64;

    /// Id of a row that must be live before `input` can be stored. Checked
    /// against the parent repository the routes were mounted with.
    fn parent_id(_input: &Self::Create) -> Option<i64> {
        None
    }

    /// Materialises a new record from its create shape.
    fn build(id: i64, input: Self::Create, now: DateTime<Utc>) -> Self;

    /// Merges `patch` into `self` and refreshes `updated_at`.
    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}
