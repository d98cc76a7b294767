//! Shared application state.

use std::sync::Arc;

use crate::application::handlers::{
    CreateHubHandler, GetHubHandler, GetUserHandler, JoinHubHandler, ListOpenHubsHandler,
    ListUpcomingHubsHandler, LoginHandler, PaymentQueryHandler, ProcessPaymentHandler,
    ProcessRefundHandler,
};
use crate::ports::{
    HubRepository, IdentityProvider, PaymentGateway, PaymentRepository, SessionValidator,
    TokenIssuer, UserRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is Arc-wrapped. Handlers are
/// built on demand from it.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub hubs: Arc<dyn HubRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub identity: Arc<dyn IdentityProvider>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub sessions: Arc<dyn SessionValidator>,
}

impl AppState {
    pub fn create_hub_handler(&self) -> CreateHubHandler {
        CreateHubHandler::new(self.users.clone(), self.hubs.clone())
    }

    pub fn join_hub_handler(&self) -> JoinHubHandler {
        JoinHubHandler::new(self.users.clone(), self.hubs.clone())
    }

    pub fn list_open_hubs_handler(&self) -> ListOpenHubsHandler {
        ListOpenHubsHandler::new(self.users.clone(), self.hubs.clone())
    }

    pub fn list_upcoming_hubs_handler(&self) -> ListUpcomingHubsHandler {
        ListUpcomingHubsHandler::new(self.users.clone(), self.hubs.clone())
    }

    pub fn get_hub_handler(&self) -> GetHubHandler {
        GetHubHandler::new(self.users.clone(), self.hubs.clone())
    }

    pub fn process_payment_handler(&self) -> ProcessPaymentHandler {
        ProcessPaymentHandler::new(
            self.users.clone(),
            self.hubs.clone(),
            self.payments.clone(),
            self.gateway.clone(),
        )
    }

    pub fn process_refund_handler(&self) -> ProcessRefundHandler {
        ProcessRefundHandler::new(self.hubs.clone(), self.payments.clone(), self.gateway.clone())
    }

    pub fn payment_queries(&self) -> PaymentQueryHandler {
        PaymentQueryHandler::new(self.payments.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.identity.clone(), self.users.clone(), self.tokens.clone())
    }

    pub fn get_user_handler(&self) -> GetUserHandler {
        GetUserHandler::new(self.users.clone())
    }
}
