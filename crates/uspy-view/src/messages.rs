//! User-facing strings (pt-BR).

use uspy_client::ClientError;

use crate::error::SubjectLoadError;

pub const SUBJECT_NOT_FOUND: &str = "Não foi possível encontrar essa disciplina";
pub const NOT_ENOUGH_DATA: &str = "Não há dados suficientes para mostrar esse recurso";
pub const LOGIN_REQUIRED: &str = "Você precisa estar logado para ter acesso a esse recurso";
pub const LOGIN_ACTION: &str = "Entrar";
pub const NO_RELATIONS: &str = "Sem requerimentos ou trancamentos";
pub const NO_REQUIREMENTS: &str = "Nenhum";

pub const EVALUATE_HEADER: &str = "AVALIE A DISCIPLINA";
pub const ABOUT_HEADER: &str = "SOBRE A DISCIPLINA";
pub const WORTH_IT_QUESTION: &str = "Vale a pena?";

pub const OPTIONAL_SUBJECT: &str = "Optativa";
pub const MANDATORY_SUBJECT: &str = "Obrigatória";

pub const SUBJECTS_BREADCRUMB: &str = "Disciplinas";

pub const PASSWORD_RESET_SENT: &str = "Email enviado com sucesso";
pub const PASSWORD_RESET_TITLE: &str = "Falha na redefinição";

/// Message shown in place of the page when the subject could not be loaded
pub fn subject_error(err: &SubjectLoadError) -> String {
    match err {
        SubjectLoadError::NotFound => SUBJECT_NOT_FOUND.to_string(),
        SubjectLoadError::Status(status) => {
            format!("Algo de errado aconteceu e essa página retornou com status {status}")
        }
        SubjectLoadError::Transport(reason) => {
            format!("Algo de errado aconteceu ao carregar essa página ({reason})")
        }
    }
}

pub fn recommendation(rate: u32) -> String {
    format!("{rate}% dos alunos dizem que essa disciplina vale a pena!")
}

pub fn review_total(total: u32) -> String {
    format!("Total de reviews: {total}")
}

/// Feedback for the password redefinition dialog
pub fn password_reset_feedback(result: &Result<(), ClientError>) -> String {
    match result {
        Ok(()) => PASSWORD_RESET_SENT.to_string(),
        Err(e) => format!("Algo deu errado ({e}). Tente novamente mais tarde."),
    }
}
