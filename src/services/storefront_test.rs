use super::*;
use crate::services::checkout::CheckoutStage;
use crate::services::money::Cents;
use crate::services::notify::Variant;
use crate::services::remote::{Credentials, PlaceholderRemote, Registration};
use std::sync::Mutex;

fn storefront() -> Storefront {
    Storefront::new(Catalog::seed(), 20)
}

/// Remote that fails every call and counts attempts.
struct DownRemote {
    calls: Mutex<usize>,
}

impl DownRemote {
    fn new() -> Self {
        Self { calls: Mutex::new(0) }
    }

    fn fail(&self) -> Result<Ack, RemoteError> {
        *self.calls.lock().expect("mock mutex should lock") += 1;
        Err(RemoteError::Unavailable("offline".into()))
    }
}

#[async_trait::async_trait]
impl RemoteService for DownRemote {
    fn name(&self) -> &str {
        "down"
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<Ack, RemoteError> {
        self.fail()
    }

    async fn register(&self, _registration: &Registration) -> Result<Ack, RemoteError> {
        self.fail()
    }

    async fn submit_payment(&self, _payment: &PaymentRequest) -> Result<Ack, RemoteError> {
        self.fail()
    }

    async fn save_profile(&self, _profile: &Profile) -> Result<Ack, RemoteError> {
        self.fail()
    }
}

/// Remote that commits everything, as a real backend would.
struct CommittingRemote;

#[async_trait::async_trait]
impl RemoteService for CommittingRemote {
    fn name(&self) -> &str {
        "committing"
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<Ack, RemoteError> {
        Ok(Ack::Committed)
    }

    async fn register(&self, _registration: &Registration) -> Result<Ack, RemoteError> {
        Ok(Ack::Committed)
    }

    async fn submit_payment(&self, _payment: &PaymentRequest) -> Result<Ack, RemoteError> {
        Ok(Ack::Committed)
    }

    async fn save_profile(&self, _profile: &Profile) -> Result<Ack, RemoteError> {
        Ok(Ack::Committed)
    }
}

fn ready_to_pay(shop: &mut Storefront, method: PaymentMethod) {
    shop.add_to_cart("1");
    shop.add_to_cart("3");
    shop.open_cart();
    shop.finalize_checkout().unwrap();
    shop.select_payment(method).unwrap();
}

// =============================================================================
// CATALOG + FILTER
// =============================================================================

#[test]
fn favorite_toggle_emits_notification_and_updates_count() {
    let mut shop = storefront();
    let n = shop.toggle_favorite("2").unwrap();
    assert_eq!(n.title, "Adicionado aos favoritos");
    assert!(n.description.contains("Macarons Franceses"));
    assert_eq!(shop.favorite_count(), 1);

    let n = shop.toggle_favorite("2").unwrap();
    assert_eq!(n.title, "Removido dos favoritos");
    assert_eq!(shop.favorite_count(), 0);
}

#[test]
fn favorite_unknown_id_is_silent() {
    let mut shop = storefront();
    assert!(shop.toggle_favorite("nope").is_none());
    assert!(shop.drain_notifications().is_empty());
}

#[test]
fn filter_state_drives_visible_products() {
    let mut shop = storefront();
    assert_eq!(shop.visible_products().len(), 4);

    shop.set_filter(Some(Category::Chocolates), Some("trufa".into()));
    let names: Vec<&str> = shop.visible_products().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Trufas Gourmet"]);

    shop.set_filter(None, Some(String::new()));
    assert_eq!(shop.filter().category, Category::Chocolates);
    assert_eq!(shop.visible_products().len(), 2);
}

// =============================================================================
// CART
// =============================================================================

#[test]
fn cart_scenario_add_add_decrement_zero() {
    let mut shop = storefront();

    shop.add_to_cart("1").unwrap();
    assert_eq!((shop.cart().item_count(), shop.cart().total()), (1, Cents::new(24, 90)));

    shop.add_to_cart("1").unwrap();
    assert_eq!((shop.cart().item_count(), shop.cart().total()), (2, Cents::new(49, 80)));

    let n = shop.adjust_quantity("1", -1).unwrap();
    assert_eq!(n.title, "Quantidade atualizada");
    assert_eq!((shop.cart().item_count(), shop.cart().total()), (1, Cents::new(24, 90)));

    let n = shop.update_quantity("1", 0).unwrap();
    assert_eq!(n.title, "Item removido");
    assert!(shop.cart().is_empty());
}

#[test]
fn decrement_at_one_removes_line() {
    let mut shop = storefront();
    shop.add_to_cart("4");
    let n = shop.adjust_quantity("4", -1).unwrap();
    assert_eq!(n.title, "Item removido");
    assert!(shop.cart().get("4").is_none());
}

#[test]
fn repeated_zero_update_is_silent_after_first() {
    let mut shop = storefront();
    shop.add_to_cart("2");
    assert!(shop.update_quantity("2", 0).is_some());
    assert!(shop.update_quantity("2", 0).is_none());
    assert!(shop.adjust_quantity("2", -1).is_none());
}

#[test]
fn add_unknown_product_is_silent() {
    let mut shop = storefront();
    assert!(shop.add_to_cart("999").is_none());
    assert!(shop.cart().is_empty());
    assert!(shop.drain_notifications().is_empty());
}

#[test]
fn remove_twice_only_notifies_once() {
    let mut shop = storefront();
    shop.add_to_cart("3");
    shop.drain_notifications();
    assert!(shop.remove_from_cart("3").is_some());
    assert!(shop.remove_from_cart("3").is_none());
    assert_eq!(shop.drain_notifications().len(), 1);
}

#[test]
fn favorites_do_not_touch_cart() {
    let mut shop = storefront();
    shop.add_to_cart("1");
    shop.toggle_favorite("1");
    assert_eq!(shop.cart().item_count(), 1);
    shop.remove_from_cart("1");
    assert_eq!(shop.favorite_count(), 1);
}

#[test]
fn notifications_queue_in_order() {
    let mut shop = storefront();
    shop.add_to_cart("1");
    shop.toggle_favorite("1");
    let titles: Vec<String> = shop.drain_notifications().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["Adicionado ao carrinho", "Adicionado aos favoritos"]);
    assert!(shop.drain_notifications().is_empty());
}

// =============================================================================
// CHECKOUT
// =============================================================================

#[tokio::test]
async fn confirm_with_placeholder_closes_panel_and_keeps_cart() {
    let mut shop = storefront();
    ready_to_pay(&mut shop, PaymentMethod::Pix);

    let n = shop.confirm_checkout(&PlaceholderRemote).await.unwrap();
    assert_eq!(n.title, "Pedido realizado!");
    assert!(n.description.contains("PIX"));
    assert!(n.description.contains("R$ 43,40"));
    assert_eq!(shop.checkout().stage(), CheckoutStage::Closed);
    assert_eq!(shop.cart().item_count(), 2);
}

#[tokio::test]
async fn confirm_without_method_keeps_stage() {
    let mut shop = storefront();
    shop.add_to_cart("1");
    shop.open_cart();
    shop.finalize_checkout().unwrap();

    let err = shop.confirm_checkout(&PlaceholderRemote).await.unwrap_err();
    assert_eq!(err, CheckoutError::NoPaymentMethod);
    assert_eq!(shop.checkout().stage(), CheckoutStage::ChoosingPayment { selected: None });
}

#[tokio::test]
async fn confirm_after_cart_emptied_is_rejected() {
    let mut shop = storefront();
    ready_to_pay(&mut shop, PaymentMethod::Debit);
    shop.remove_from_cart("1");
    shop.remove_from_cart("3");

    let err = shop.confirm_checkout(&PlaceholderRemote).await.unwrap_err();
    assert_eq!(err, CheckoutError::CartEmpty);
}

#[tokio::test]
async fn confirm_remote_failure_keeps_stage() {
    let mut shop = storefront();
    ready_to_pay(&mut shop, PaymentMethod::Boleto);
    let remote = DownRemote::new();

    let err = shop.confirm_checkout(&remote).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Remote(RemoteError::Unavailable(_))));
    assert_eq!(shop.checkout().stage(), CheckoutStage::ChoosingPayment { selected: Some(PaymentMethod::Boleto) });
    assert_eq!(*remote.calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn confirm_with_committing_backend_reports_confirmed() {
    let mut shop = storefront();
    ready_to_pay(&mut shop, PaymentMethod::Credit);
    let n = shop.confirm_checkout(&CommittingRemote).await.unwrap();
    assert!(n.description.ends_with("confirmado."));
}

#[test]
fn finalize_with_empty_cart_is_rejected() {
    let mut shop = storefront();
    shop.open_cart();
    assert_eq!(shop.finalize_checkout(), Err(CheckoutError::CartEmpty));
}

// =============================================================================
// AUTH
// =============================================================================

#[tokio::test]
async fn password_mismatch_changes_nothing() {
    let mut shop = storefront();
    let form = AuthForm {
        mode: AuthMode::Register,
        name: "Ana".into(),
        email: "ana@doces.com".into(),
        password: "um".into(),
        confirm_password: "dois".into(),
    };
    let remote = DownRemote::new();

    let err = shop.submit_auth(&form, &remote).await.unwrap_err();
    assert_eq!(err, AuthError::PasswordMismatch);
    assert!(shop.user().is_none());
    assert_eq!(shop.profile(), &Profile::default());
    assert!(shop.drain_notifications().is_empty());
    assert_eq!(*remote.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn register_signs_in_and_fills_profile() {
    let mut shop = storefront();
    let form = AuthForm {
        mode: AuthMode::Register,
        name: "Ana Souza".into(),
        email: "ana@doces.com".into(),
        password: "segredo".into(),
        confirm_password: "segredo".into(),
    };

    let n = shop.submit_auth(&form, &PlaceholderRemote).await.unwrap();
    assert_eq!(n.title, "Conta criada!");
    assert_eq!(shop.user().map(|u| u.name.as_str()), Some("Ana Souza"));
    assert_eq!(shop.profile().name, "Ana Souza");
    assert_eq!(shop.profile().email, "ana@doces.com");
}

#[tokio::test]
async fn login_remote_failure_leaves_user_signed_out() {
    let mut shop = storefront();
    let form = AuthForm { email: "ana@doces.com".into(), password: "x".into(), ..AuthForm::default() };
    let err = shop.submit_auth(&form, &DownRemote::new()).await.unwrap_err();
    assert!(matches!(err, AuthError::Remote(_)));
    assert!(shop.user().is_none());
}

#[tokio::test]
async fn sign_out_only_notifies_when_signed_in() {
    let mut shop = storefront();
    assert!(shop.sign_out().is_none());

    let form = AuthForm { email: "ana@doces.com".into(), password: "x".into(), ..AuthForm::default() };
    shop.submit_auth(&form, &PlaceholderRemote).await.unwrap();
    assert_eq!(shop.sign_out().map(|n| n.title), Some("Até logo!".to_owned()));
    assert!(shop.user().is_none());
}

// =============================================================================
// PROFILE
// =============================================================================

#[tokio::test]
async fn save_profile_with_placeholder_says_local_only() {
    let mut shop = storefront();
    shop.update_profile(ProfilePatch { phone: Some("(11) 1234-5678".into()), ..ProfilePatch::default() })
        .unwrap();
    let n = shop.save_profile(&PlaceholderRemote).await.unwrap();
    assert_eq!(n.title, "Perfil salvo localmente");
    assert_eq!(n.variant, Variant::Default);
    assert_eq!(shop.profile().phone, "(11) 1234-5678");
}

#[tokio::test]
async fn save_profile_failure_keeps_local_edits() {
    let mut shop = storefront();
    shop.update_profile(ProfilePatch { name: Some("Maria".into()), ..ProfilePatch::default() })
        .unwrap();
    assert!(shop.save_profile(&DownRemote::new()).await.is_err());
    assert_eq!(shop.profile().name, "Maria");
}

// =============================================================================
// SESSION BOOKKEEPING
// =============================================================================

#[test]
fn idle_for_measures_since_last_touch() {
    let mut shop = storefront();
    shop.touch();
    let later = Instant::now() + Duration::from_secs(90);
    assert!(shop.idle_for(later) >= Duration::from_secs(90));
}
