//! Storefront — the single owner of one shopper's state.
//!
//! DESIGN
//! ======
//! A `Storefront` holds the canonical catalog copy, cart, active filter,
//! checkout stage, profile form, and signed-in user for one session. Every
//! mutation goes through a method here; HTTP handlers only read projections
//! back out. Counts, totals, and the filtered product list are derived on
//! each read.
//!
//! Mutations that the shopper should see return the `Notification` they
//! emitted and also queue it. Silent no-ops (unknown ids, double removes)
//! return `None` and queue nothing.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::auth::{self, AuthError, AuthForm, AuthMode, SignedInUser};
use super::cart::{self, Cart, CartChange, CartItem};
use super::catalog::{Catalog, Category, Product};
use super::checkout::{CheckoutError, CheckoutFlow, PaymentMethod};
use super::filter::ProductFilter;
use super::notify::{Notification, NotificationQueue};
use super::profile::{Profile, ProfileError, ProfilePatch};
use super::remote::{Ack, PaymentRequest, RemoteError, RemoteService};

pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    filter: ProductFilter,
    checkout: CheckoutFlow,
    profile: Profile,
    user: Option<SignedInUser>,
    notifications: NotificationQueue,
    last_seen: Instant,
}

impl Storefront {
    #[must_use]
    pub fn new(catalog: Catalog, notification_backlog: usize) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            filter: ProductFilter::default(),
            checkout: CheckoutFlow::default(),
            profile: Profile::default(),
            user: None,
            notifications: NotificationQueue::new(notification_backlog),
            last_seen: Instant::now(),
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn user(&self) -> Option<&SignedInUser> {
        self.user.as_ref()
    }

    /// Products passing the session's active filter.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.apply(self.catalog.products())
    }

    #[must_use]
    pub fn favorite_count(&self) -> usize {
        self.catalog.favorite_count()
    }

    // =========================================================================
    // SESSION BOOKKEEPING
    // =========================================================================

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    #[must_use]
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen)
    }

    #[must_use]
    pub fn pending_notifications(&self) -> usize {
        self.notifications.len()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        if self.notifications.is_empty() {
            return Vec::new();
        }
        self.notifications.drain()
    }

    fn notify(&mut self, notification: Notification) -> Notification {
        self.notifications.push(notification.clone());
        notification
    }

    // =========================================================================
    // CATALOG + FILTER
    // =========================================================================

    pub fn set_filter(&mut self, category: Option<Category>, search: Option<String>) {
        if let Some(category) = category {
            self.filter.category = category;
        }
        if let Some(search) = search {
            self.filter.search = search;
        }
    }

    pub fn toggle_favorite(&mut self, product_id: &str) -> Option<Notification> {
        let product = self.catalog.toggle_favorite(product_id)?;
        info!(product_id, favorite = product.favorite, "favorite toggled");
        let notification = if product.favorite {
            Notification::info("Adicionado aos favoritos", format!("{} foi adicionado aos seus favoritos.", product.name))
        } else {
            Notification::info("Removido dos favoritos", format!("{} foi removido dos seus favoritos.", product.name))
        };
        Some(self.notify(notification))
    }

    // =========================================================================
    // CART
    // =========================================================================

    pub fn add_to_cart(&mut self, product_id: &str) -> Option<Notification> {
        let product = self.catalog.get(product_id)?;
        let item = self.cart.add(product);
        info!(product_id, quantity = item.quantity, "added to cart");
        let notification =
            Notification::info("Adicionado ao carrinho", format!("{} foi adicionado ao seu carrinho.", item.name));
        Some(self.notify(notification))
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Option<Notification> {
        let notification = match self.cart.update_quantity(product_id, quantity) {
            CartChange::Updated(item) => {
                info!(product_id, quantity, "cart quantity updated");
                Notification::info(
                    "Quantidade atualizada",
                    format!("{}: {} {}.", item.name, item.quantity, units(item.quantity)),
                )
            }
            CartChange::Removed(item) => {
                info!(product_id, "cart line removed by zero quantity");
                removal_notification(&item)
            }
            CartChange::Missing => return None,
        };
        Some(self.notify(notification))
    }

    /// Step a line's quantity by `delta`, stopping at zero (which removes it).
    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) -> Option<Notification> {
        let current = self.cart.get(product_id)?.quantity;
        self.update_quantity(product_id, cart::clamp_quantity(current, delta))
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> Option<Notification> {
        let item = self.cart.remove(product_id)?;
        info!(product_id, "cart line removed");
        Some(self.notify(removal_notification(&item)))
    }

    // =========================================================================
    // CHECKOUT
    // =========================================================================

    pub fn open_cart(&mut self) {
        self.checkout.open();
    }

    pub fn close_cart(&mut self) {
        self.checkout.close();
    }

    /// # Errors
    ///
    /// See [`CheckoutFlow::finalize`].
    pub fn finalize_checkout(&mut self) -> Result<(), CheckoutError> {
        self.checkout.finalize(self.cart.is_empty())
    }

    /// # Errors
    ///
    /// See [`CheckoutFlow::back`].
    pub fn checkout_back(&mut self) -> Result<(), CheckoutError> {
        self.checkout.back()
    }

    /// # Errors
    ///
    /// See [`CheckoutFlow::select`].
    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.checkout.select(method)
    }

    /// Hand the payment to the remote service and close the panel.
    ///
    /// # Errors
    ///
    /// Transition errors from the flow, `CartEmpty` if every line was removed
    /// while choosing, or the remote service's error. The stage is unchanged
    /// on any error.
    pub async fn confirm_checkout(&mut self, remote: &dyn RemoteService) -> Result<Notification, CheckoutError> {
        let method = self.checkout.ready_to_confirm()?;
        if self.cart.is_empty() {
            return Err(CheckoutError::CartEmpty);
        }
        let payment = PaymentRequest { method, total: self.cart.total(), item_count: self.cart.item_count() };
        let ack = remote.submit_payment(&payment).await.inspect_err(|e| {
            warn!(error = %e, backend = remote.name(), "payment submission failed");
        })?;

        self.checkout.complete();
        info!(method = method.label(), total = %payment.total, ?ack, "checkout confirmed");
        let description = match ack {
            Ack::Simulated => format!(
                "Pagamento via {} no valor de {} registrado. O processamento será ativado em breve.",
                method.label(),
                payment.total.label()
            ),
            Ack::Committed => format!("Pagamento via {} no valor de {} confirmado.", method.label(), payment.total.label()),
        };
        Ok(self.notify(Notification::info("Pedido realizado!", description)))
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// Validate and submit a login/register form.
    ///
    /// # Errors
    ///
    /// Validation errors leave every part of the session untouched, including
    /// the notification queue. Remote errors are passed through.
    pub async fn submit_auth(&mut self, form: &AuthForm, remote: &dyn RemoteService) -> Result<Notification, AuthError> {
        auth::validate(form)?;
        let ack = match form.mode {
            AuthMode::Login => remote.sign_in(&form.credentials()).await?,
            AuthMode::Register => remote.register(&form.registration()).await?,
        };

        let user = form.signed_in_user();
        info!(mode = ?form.mode, email = %user.email, ?ack, "shopper signed in");
        if form.mode == AuthMode::Register {
            self.profile.name.clone_from(&user.name);
        }
        self.profile.email.clone_from(&user.email);
        self.user = Some(user);
        Ok(self.notify(auth::success_notification(form.mode)))
    }

    pub fn sign_out(&mut self) -> Option<Notification> {
        let user = self.user.take()?;
        info!(email = %user.email, "shopper signed out");
        Some(self.notify(Notification::info("Até logo!", "Você saiu da sua conta.")))
    }

    // =========================================================================
    // PROFILE
    // =========================================================================

    /// # Errors
    ///
    /// See [`Profile::apply`].
    pub fn update_profile(&mut self, patch: ProfilePatch) -> Result<(), ProfileError> {
        self.profile.apply(patch)
    }

    /// # Errors
    ///
    /// Returns the remote service's error; the local profile is kept.
    pub async fn save_profile(&mut self, remote: &dyn RemoteService) -> Result<Notification, RemoteError> {
        let ack = remote.save_profile(&self.profile).await?;
        let notification = match ack {
            Ack::Simulated => Notification::info("Perfil salvo localmente", "Salvar o perfil na sua conta estará disponível em breve."),
            Ack::Committed => Notification::info("Perfil atualizado!", "Suas alterações foram salvas."),
        };
        Ok(self.notify(notification))
    }
}

fn units(quantity: u32) -> &'static str {
    if quantity == 1 { "unidade" } else { "unidades" }
}

fn removal_notification(item: &CartItem) -> Notification {
    Notification::info("Item removido", format!("{} foi removido do seu carrinho.", item.name))
}

#[cfg(test)]
#[path = "storefront_test.rs"]
mod tests;
