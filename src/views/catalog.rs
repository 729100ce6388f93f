use serde::Serialize;

use super::LoadState;
use crate::api::BookingApi;
use crate::models::Service;
use crate::notice::Notice;

#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub services: LoadState<Vec<Service>>,
    pub notices: Vec<Notice>,
}

/// Seeds the catalog, then lists it. A failed seed is only logged.
pub async fn load(api: &dyn BookingApi) -> CatalogView {
    if let Err(e) = api.init_services().await {
        tracing::warn!(error = %e, "catalog seeding failed");
    }

    match api.list_services().await {
        Ok(services) => CatalogView {
            services: LoadState::Loaded(services),
            notices: Vec::new(),
        },
        Err(e) => {
            tracing::error!(error = %e, "failed to load services");
            CatalogView {
                services: LoadState::Failed,
                notices: vec![Notice::error("Erro ao carregar serviços")],
            }
        }
    }
}
