//! Help dialog content shown from the login page.

use axum::response::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HelpSection {
    pub heading: &'static str,
    pub body: &'static str,
}

#[derive(Serialize)]
pub struct SupportContacts {
    pub email: &'static str,
    pub whatsapp: &'static str,
}

#[derive(Serialize)]
pub struct HelpContent {
    pub title: &'static str,
    pub sections: Vec<HelpSection>,
    pub support: SupportContacts,
}

/// `GET /api/help` — no session required.
pub async fn help() -> Json<HelpContent> {
    Json(HelpContent {
        title: "Como podemos ajudar?",
        sections: vec![
            HelpSection {
                heading: "Problemas para entrar?",
                body: "Verifique se seu email e senha estão corretos. Se esqueceu sua senha, entre em contato conosco.",
            },
            HelpSection {
                heading: "Criar nova conta",
                body: "Clique em \"Criar conta grátis\" para se registrar e começar a comprar nossos deliciosos doces!",
            },
        ],
        support: SupportContacts { email: "ajuda@docesdaana.com.br", whatsapp: "(11) 99999-9999" },
    })
}
