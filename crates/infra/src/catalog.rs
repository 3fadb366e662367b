//! Catalog service: product listing and lookup for sellers.

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use brocante_catalog::{NewProduct, Product};
use brocante_core::{DomainError, Identity, ProductId, Role};

use crate::error::ServiceResult;
use crate::store::{Store, StoreError};

pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// List a new product owned by the calling seller.
    #[instrument(skip(self, identity, attrs), fields(user_id = %identity.user_id()))]
    pub fn create_product(&self, identity: &Identity, attrs: NewProduct) -> ServiceResult<Product> {
        if identity.role() == Role::Buyer {
            return Err(DomainError::Forbidden.into());
        }

        let product = Product::create(ProductId::new(), identity.user_id(), attrs, Utc::now())?;
        self.store.upsert_product(product.clone())?;

        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    pub fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.store.get_product(id)
    }
}
