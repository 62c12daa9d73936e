//! In-memory cart mutations.
//!
//! Every mutator keeps `total_price == Σ items.subtotal`. Quantity changes
//! adjust the total by the subtotal delta rather than re-summing.

use jiff::Timestamp;

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        records::{CartItemRecord, CartItemUuid, CartOwner, CartRecord, CartUuid},
    },
    products::records::{ProductRecord, ProductUuid},
};

/// Largest line quantity that fits the storage column.
pub(crate) const MAX_LINE_QUANTITY: u32 = i32::MAX.unsigned_abs();

impl CartRecord {
    /// An empty, unsaved cart for `owner`.
    #[must_use]
    pub fn empty(owner: CartOwner, now: Timestamp) -> Self {
        Self {
            uuid: CartUuid::new(),
            owner,
            items: Vec::new(),
            total_price: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn line(&self, product: ProductUuid) -> Option<&CartItemRecord> {
        self.items.iter().find(|item| item.product_uuid == product)
    }

    /// Add `quantity` of `product`, merging into an existing line.
    pub(crate) fn add_line(
        &mut self,
        product: &ProductRecord,
        quantity: u32,
    ) -> Result<(), CartsServiceError> {
        ensure_purchasable(product)?;

        let subtotal = line_subtotal(product.price, quantity)?;
        let total_price = self
            .total_price
            .checked_add(subtotal)
            .filter(|total| fits_storage(*total))
            .ok_or(CartsServiceError::InvalidQuantity)?;

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_uuid == product.uuid)
        {
            let merged_quantity = item
                .quantity
                .checked_add(quantity)
                .filter(|merged| *merged <= MAX_LINE_QUANTITY)
                .ok_or(CartsServiceError::InvalidQuantity)?;

            item.quantity = merged_quantity;
            item.subtotal += subtotal;
        } else {
            self.items.push(CartItemRecord {
                uuid: CartItemUuid::new(),
                product_uuid: product.uuid,
                product_name: product.name.clone(),
                product_image_url: product.image_url.clone(),
                quantity,
                subtotal,
            });
        }

        self.total_price = total_price;

        Ok(())
    }

    /// Replace a line's quantity, repricing it at the current unit price.
    pub(crate) fn set_line_quantity(
        &mut self,
        product: &ProductRecord,
        quantity: u32,
    ) -> Result<(), CartsServiceError> {
        ensure_purchasable(product)?;

        let subtotal = line_subtotal(product.price, quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.product_uuid == product.uuid)
            .ok_or(CartsServiceError::ItemNotFound)?;

        let total_price = self
            .total_price
            .saturating_sub(item.subtotal)
            .checked_add(subtotal)
            .filter(|total| fits_storage(*total))
            .ok_or(CartsServiceError::InvalidQuantity)?;

        item.quantity = quantity;
        item.subtotal = subtotal;
        self.total_price = total_price;

        Ok(())
    }

    /// Drop the line for `product`, returning it.
    pub(crate) fn remove_line(
        &mut self,
        product: ProductUuid,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let position = self
            .items
            .iter()
            .position(|item| item.product_uuid == product)
            .ok_or(CartsServiceError::ItemNotFound)?;

        let removed = self.items.remove(position);

        self.total_price = self.total_price.saturating_sub(removed.subtotal);

        Ok(removed)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.total_price = 0;
    }
}

fn ensure_purchasable(product: &ProductRecord) -> Result<(), CartsServiceError> {
    if product.is_active {
        Ok(())
    } else {
        Err(CartsServiceError::ProductInactive)
    }
}

fn line_subtotal(price: u64, quantity: u32) -> Result<u64, CartsServiceError> {
    if quantity == 0 || quantity > MAX_LINE_QUANTITY {
        return Err(CartsServiceError::InvalidQuantity);
    }

    price
        .checked_mul(u64::from(quantity))
        .filter(|subtotal| fits_storage(*subtotal))
        .ok_or(CartsServiceError::InvalidQuantity)
}

/// Amounts are stored as `BIGINT`.
fn fits_storage(amount: u64) -> bool {
    i64::try_from(amount).is_ok()
}
