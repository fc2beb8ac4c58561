//! Orders service.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    database::Db,
    documents::{DocumentRenderer, ReceiptDocument, RenderedDocument, TableReceiptRenderer},
    domain::{
        albums::{records::AlbumUuid, repository::PgAlbumsRepository},
        carts::{CartIdentity, repository::PgCartsRepository},
        orders::{
            data::{PricedLine, order_total, receipt_number, validate_lines},
            errors::{BlockedActor, OrdersServiceError},
            records::{
                OrderDetails, OrderRecord, OrderStatus, OrderUuid, PaymentMethod, ReceiptRecord,
                ReceiptUuid, ShippingInfo,
            },
            repositories::{PgOrderItemsRepository, PgOrdersRepository, PgReceiptsRepository},
        },
        users::{access, records::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    receipts: PgReceiptsRepository,
    carts: PgCartsRepository,
    albums: PgAlbumsRepository,
    users: PgUsersRepository,
    renderer: Arc<dyn DocumentRenderer>,
}

impl PgOrdersService {
    /// Orders service rendering receipts as text tables.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_renderer(db, Arc::new(TableReceiptRenderer::new()))
    }

    #[must_use]
    pub fn with_renderer(db: Db, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            receipts: PgReceiptsRepository::new(),
            carts: PgCartsRepository::new(),
            albums: PgAlbumsRepository::new(),
            users: PgUsersRepository::new(),
            renderer,
        }
    }

    /// Write the order, its items, the stock decrements and the cart clear.
    ///
    /// Must run in the transaction that locked and validated the cart and albums.
    async fn place_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &str,
        user: UserUuid,
        shipping: &ShippingInfo,
        lines: &[PricedLine],
    ) -> Result<OrderDetails, sqlx::Error> {
        let order = self
            .orders
            .create_order(tx, OrderUuid::new(), user, shipping, order_total(lines))
            .await?;

        for line in lines {
            self.items.create_order_item(tx, order.uuid, line).await?;

            if !self
                .albums
                .decrement_stock(tx, line.album_uuid, line.quantity)
                .await?
            {
                return Err(sqlx::Error::Protocol(format!(
                    "stock of album {} changed during checkout",
                    line.album_uuid
                )));
            }
        }

        self.carts.clear_cart(tx, cart).await?;

        let items = self.items.list_order_items(tx, order.uuid).await?;

        Ok(OrderDetails {
            order,
            items,
            receipt: None,
        })
    }

    /// Load an order the requester is allowed to see.
    async fn visible_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        requester: UserUuid,
        is_admin: bool,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let order = self.orders.get_order(tx, order).await?;

        if !is_admin && order.user_uuid != requester {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(
        &self,
        cart: &CartIdentity,
        user: UserUuid,
        shipping: ShippingInfo,
    ) -> Result<OrderDetails, OrdersServiceError> {
        shipping
            .validate()
            .map_err(OrdersServiceError::InvalidShipping)?;

        let mut tx = self.db.begin().await?;

        if !access::can_mutate_commerce(&mut tx, user).await? {
            warn!(%user, "checkout refused, account blocked");

            return Err(OrdersServiceError::Blocked(BlockedActor::Customer));
        }

        let key = cart.storage_key();

        self.carts.delete_non_positive(&mut tx, &key).await?;

        let lines: Vec<(AlbumUuid, i32)> = self
            .carts
            .lock_lines(&mut tx, &key)
            .await?
            .into_iter()
            .map(|line| (line.album_uuid, line.quantity))
            .collect();

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let album_uuids: Vec<AlbumUuid> = lines.iter().map(|(album, _)| *album).collect();
        let albums: BTreeMap<AlbumUuid, _> = self
            .albums
            .lock_albums(&mut tx, &album_uuids)
            .await?
            .into_iter()
            .map(|album| (album.uuid, album))
            .collect();

        let priced = validate_lines(&lines, &albums).map_err(|rejection| {
            warn!(%user, reasons = %rejection, "checkout rejected");

            OrdersServiceError::Rejected(rejection)
        })?;

        let details = self
            .place_order(&mut tx, &key, user, &shipping, &priced)
            .await
            .map_err(OrdersServiceError::CheckoutAborted)?;

        tx.commit()
            .await
            .map_err(OrdersServiceError::CheckoutAborted)?;

        info!(
            order = %details.order.uuid,
            number = details.order.number,
            %user,
            total = %details.order.total,
            items = details.items.len(),
            "order placed"
        );

        Ok(details)
    }

    async fn checkout_defaults(&self, user: UserUuid) -> Result<ShippingInfo, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.users.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(ShippingInfo::from_profile(&user))
    }

    async fn pay(
        &self,
        order: OrderUuid,
        method: PaymentMethod,
        requester: UserUuid,
        is_admin: bool,
    ) -> Result<ReceiptRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .orders
            .lock_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if !is_admin && order.user_uuid != requester {
            return Err(OrdersServiceError::Forbidden);
        }

        if order.is_paid {
            return Err(OrdersServiceError::AlreadyPaid);
        }

        if !access::can_mutate_commerce(&mut tx, order.user_uuid).await? {
            warn!(order = %order.uuid, owner = %order.user_uuid, "payment refused, owner blocked");

            return Err(OrdersServiceError::Blocked(BlockedActor::OrderOwner));
        }

        if !is_admin && !access::can_mutate_commerce(&mut tx, requester).await? {
            return Err(OrdersServiceError::Blocked(BlockedActor::Requester));
        }

        if !self.orders.mark_paid(&mut tx, order.uuid).await? {
            return Err(OrdersServiceError::AlreadyPaid);
        }

        let issued_at = Timestamp::now();
        let receipt = self
            .receipts
            .create_receipt(
                &mut tx,
                &ReceiptRecord {
                    uuid: ReceiptUuid::new(),
                    order_uuid: order.uuid,
                    number: receipt_number(order.number, issued_at),
                    payment_method: method,
                    issued_at,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            order = %order.uuid,
            receipt = %receipt.number,
            method = %method,
            "order paid"
        );

        Ok(receipt)
    }

    async fn change_status(
        &self,
        order: OrderUuid,
        status: &str,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let status: OrderStatus = status.parse()?;

        let mut tx = self.db.begin().await?;

        let order = self.orders.set_status(&mut tx, order, status).await?;

        tx.commit().await?;

        info!(order = %order.uuid, status = %order.status, "order status changed");

        Ok(order)
    }

    async fn get_order(
        &self,
        order: OrderUuid,
        requester: UserUuid,
        is_admin: bool,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .visible_order(&mut tx, order, requester, is_admin)
            .await?;
        let items = self.items.list_order_items(&mut tx, order.uuid).await?;
        let receipt = self.receipts.find_receipt(&mut tx, order.uuid).await?;

        tx.commit().await?;

        Ok(OrderDetails {
            order,
            items,
            receipt,
        })
    }

    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders_for_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_all_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_all_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn generate_receipt_document(
        &self,
        order: OrderUuid,
        requester: UserUuid,
        is_admin: bool,
    ) -> Result<RenderedDocument, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .visible_order(&mut tx, order, requester, is_admin)
            .await?;

        let receipt = self
            .receipts
            .find_receipt(&mut tx, order.uuid)
            .await?
            .ok_or(OrdersServiceError::MissingReceipt)?;

        let items = self.items.list_order_items(&mut tx, order.uuid).await?;

        tx.commit().await?;

        let document = ReceiptDocument::new(&order, &items, &receipt);
        let bytes = self.renderer.render_receipt(&document)?;

        Ok(RenderedDocument {
            file_name: format!("receipt-{}.{}", receipt.number, self.renderer.extension()),
            content_type: self.renderer.content_type(),
            bytes,
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the cart into an order for `user`.
    ///
    /// Every line is revalidated against locked, current stock. Either the order, its
    /// items, the stock decrements and the cart clear all happen, or none do.
    ///
    /// # Errors
    ///
    /// - [`OrdersServiceError::InvalidShipping`] when a shipping field is missing.
    /// - [`OrdersServiceError::Blocked`] when the user is blocked.
    /// - [`OrdersServiceError::EmptyCart`] when there is nothing to order.
    /// - [`OrdersServiceError::Rejected`] listing every line that failed validation.
    /// - [`OrdersServiceError::CheckoutAborted`] when writing the order failed.
    async fn checkout(
        &self,
        cart: &CartIdentity,
        user: UserUuid,
        shipping: ShippingInfo,
    ) -> Result<OrderDetails, OrdersServiceError>;

    /// Shipping details prefilled from the user's profile.
    async fn checkout_defaults(&self, user: UserUuid) -> Result<ShippingInfo, OrdersServiceError>;

    /// Mark an order paid and issue its receipt.
    ///
    /// # Errors
    ///
    /// - [`OrdersServiceError::NotFound`] when the order does not exist.
    /// - [`OrdersServiceError::Forbidden`] when a non-admin pays someone else's order.
    /// - [`OrdersServiceError::AlreadyPaid`] on a second payment.
    /// - [`OrdersServiceError::Blocked`] when the owner, or a non-admin requester, is blocked.
    async fn pay(
        &self,
        order: OrderUuid,
        method: PaymentMethod,
        requester: UserUuid,
        is_admin: bool,
    ) -> Result<ReceiptRecord, OrdersServiceError>;

    /// Set the fulfilment status from a status token. Callers must restrict this to
    /// administrators.
    ///
    /// # Errors
    ///
    /// - [`OrdersServiceError::InvalidStatus`] for unknown tokens; nothing changes.
    async fn change_status(
        &self,
        order: OrderUuid,
        status: &str,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// An order with its items and receipt, for its owner or an admin.
    async fn get_order(
        &self,
        order: OrderUuid,
        requester: UserUuid,
        is_admin: bool,
    ) -> Result<OrderDetails, OrdersServiceError>;

    /// A user's orders, newest first.
    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_all_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Render the receipt of a paid order.
    ///
    /// # Errors
    ///
    /// - [`OrdersServiceError::Forbidden`] when a non-admin asks for someone else's order.
    /// - [`OrdersServiceError::MissingReceipt`] when the order is not paid yet.
    async fn generate_receipt_document(
        &self,
        order: OrderUuid,
        requester: UserUuid,
        is_admin: bool,
    ) -> Result<RenderedDocument, OrdersServiceError>;
}
