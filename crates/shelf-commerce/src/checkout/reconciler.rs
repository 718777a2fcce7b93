//! Checkout reconciler state machine.

use crate::cart::{CartStore, CartSummary};
use crate::checkout::{Transaction, TransactionGateway, TransactionRequest};
use crate::money::Money;
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Where the reconciler is in a checkout cycle.
///
/// `Succeeded` and `Failed` are resting states: a new attempt may begin
/// from either, exactly as from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Idle => "idle",
            CheckoutStatus::Submitting => "submitting",
            CheckoutStatus::Succeeded => "succeeded",
            CheckoutStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
struct RetainedFailure {
    error: CommerceError,
    cart_revision: u64,
}

/// Turns the cart into a server-confirmed transaction.
///
/// Use [`CheckoutReconciler::submit`] for the one-shot flow, or
/// [`begin`](CheckoutReconciler::begin) and
/// [`complete`](CheckoutReconciler::complete) when the cart must stay
/// editable while the request is in flight.
#[derive(Debug, Clone, Default)]
pub struct CheckoutReconciler {
    status: CheckoutStatus,
    shipping: Option<Money>,
    failure: Option<RetainedFailure>,
    last_transaction: Option<Transaction>,
}

impl CheckoutReconciler {
    /// A reconciler that charges no shipping.
    pub fn new() -> Self {
        Self::default()
    }

    /// A reconciler that adds a flat shipping charge to the summary.
    pub fn with_shipping(shipping: Money) -> Self {
        Self {
            shipping: Some(shipping),
            ..Self::default()
        }
    }

    pub fn status(&self) -> CheckoutStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == CheckoutStatus::Submitting
    }

    /// Totals for the current cart, shipping included.
    pub fn summary(&self, cart: &CartStore) -> CartSummary {
        let shipping = self
            .shipping
            .unwrap_or_else(|| Money::zero(cart.state().currency()));
        cart.summary(shipping)
    }

    /// Start an attempt: snapshot the cart into a request.
    ///
    /// Clears any retained failure. Fails with `CheckoutInProgress` while
    /// another attempt is outstanding and with `EmptyCart` when there is
    /// nothing to buy; neither moves the state machine.
    pub fn begin(&mut self, cart: &CartStore) -> Result<TransactionRequest, CommerceError> {
        if self.is_submitting() {
            return Err(CommerceError::CheckoutInProgress);
        }
        self.failure = None;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let request = TransactionRequest::from_cart(cart.state());
        self.status = CheckoutStatus::Submitting;
        info!(
            lines = request.items.len(),
            quantity = request.total_quantity(),
            "checkout submitting"
        );
        Ok(request)
    }

    /// Apply the server's answer to an attempt started with `begin`.
    ///
    /// Success clears the cart. Failure leaves the cart alone and keeps the
    /// error for [`failure`](CheckoutReconciler::failure) until the next
    /// attempt or cart edit. Without a pending attempt the outcome is
    /// refused with `NoCheckoutPending` and nothing changes.
    pub fn complete(
        &mut self,
        outcome: Result<Transaction, CommerceError>,
        cart: &mut CartStore,
    ) -> Result<Transaction, CommerceError> {
        if !self.is_submitting() {
            warn!(status = self.status.as_str(), "checkout outcome without a pending attempt");
            return Err(CommerceError::NoCheckoutPending);
        }

        match outcome {
            Ok(transaction) => {
                cart.clear_cart();
                self.status = CheckoutStatus::Succeeded;
                self.last_transaction = Some(transaction.clone());
                info!(transaction_id = %transaction.id, total = transaction.total_amount, "checkout succeeded");
                Ok(transaction)
            }
            Err(error) => {
                self.status = CheckoutStatus::Failed;
                self.failure = Some(RetainedFailure {
                    error: error.clone(),
                    cart_revision: cart.revision(),
                });
                warn!(%error, "checkout rejected");
                Err(error)
            }
        }
    }

    /// Build, send and settle one checkout attempt.
    pub async fn submit<G>(
        &mut self,
        cart: &mut CartStore,
        gateway: &G,
    ) -> Result<Transaction, CommerceError>
    where
        G: TransactionGateway + ?Sized,
    {
        let request = self.begin(cart)?;
        let outcome = gateway.create_transaction(&request).await;
        self.complete(outcome, cart)
    }

    /// The last failure, if the cart has not been edited since.
    pub fn failure(&self, cart: &CartStore) -> Option<&CommerceError> {
        self.failure
            .as_ref()
            .filter(|f| f.cart_revision == cart.revision())
            .map(|f| &f.error)
    }

    /// Text to show for the retained failure.
    pub fn failure_message(&self, cart: &CartStore) -> Option<String> {
        self.failure(cart).map(CommerceError::user_message)
    }

    /// The transaction created by the last successful attempt.
    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.last_transaction.as_ref()
    }
}
