use std::time::Duration;

use serde::Serialize;

use super::LoadState;
use crate::api::BookingApi;
use crate::models::{NotificationConfig, NotificationStatus};
use crate::notice::Notice;

#[derive(Debug, Serialize)]
pub struct NotificationView {
    pub status: LoadState<NotificationStatus>,
    /// Editable form. The SMTP password is never echoed back.
    pub form: NotificationConfig,
    pub notices: Vec<Notice>,
}

pub async fn load(api: &dyn BookingApi) -> NotificationView {
    match api.notification_status().await {
        Ok(status) => NotificationView {
            form: NotificationConfig::prefilled(&status),
            status: LoadState::Loaded(status),
            notices: Vec::new(),
        },
        Err(e) => {
            tracing::error!(error = %e, "failed to load notification config");
            NotificationView {
                status: LoadState::Failed,
                form: NotificationConfig::default(),
                notices: vec![Notice::error("Erro ao carregar configuração")],
            }
        }
    }
}

fn missing_required(config: &NotificationConfig) -> bool {
    [&config.owner_email, &config.smtp_user, &config.smtp_password]
        .iter()
        .any(|v| v.trim().is_empty())
}

/// Replaces the backend's notification record. The backend restarts itself
/// afterwards; the status is re-read once `restart_delay` has passed.
pub async fn save(
    api: &dyn BookingApi,
    config: NotificationConfig,
    restart_delay: Duration,
) -> NotificationView {
    let form = NotificationConfig {
        smtp_password: String::new(),
        ..config.clone()
    };

    if missing_required(&config) {
        let mut view = load(api).await;
        view.form = form;
        view.notices.insert(0, Notice::warning("Preencha todos os campos obrigatórios"));
        return view;
    }

    if let Err(e) = api.save_notification_config(&config).await {
        tracing::error!(error = %e, "failed to save notification config");
        let mut view = load(api).await;
        view.form = form;
        view.notices.insert(0, Notice::error("Erro ao salvar configurações"));
        return view;
    }

    tracing::info!(owner_email = %config.owner_email, "notification config saved");
    tokio::time::sleep(restart_delay).await;

    let mut view = load(api).await;
    view.form = form;
    let mut notices = vec![Notice::success("Configurações salvas! Reiniciando backend...")];
    if view.status.loaded().is_some() {
        notices.push(Notice::success("Backend reiniciado! Notificações ativadas."));
    }
    notices.append(&mut view.notices);
    view.notices = notices;
    view
}
