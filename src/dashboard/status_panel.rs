use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Watering,
    Waiting,
    Error,
}

impl Display for StatusIndicator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            StatusIndicator::Watering => "Regando Agora!",
            StatusIndicator::Waiting => "Aguardando Próxima Rega",
            StatusIndicator::Error => "Erro ao carregar status.",
        };
        write!(f, "{}", text)
    }
}

/// One refresh of the status regions.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub indicator: StatusIndicator,
    /// `None` leaves the duration region as it was.
    pub duration_line: Option<String>,
    pub timestamp_line: String,
}

impl StatusUpdate {
    pub fn watering(duration: f64, timestamp_line: String) -> Self {
        Self {
            indicator: StatusIndicator::Watering,
            duration_line: Some(format!("Duração: {} minutos", duration)),
            timestamp_line,
        }
    }

    pub fn waiting(timestamp_line: String) -> Self {
        Self {
            indicator: StatusIndicator::Waiting,
            duration_line: Some(String::new()),
            timestamp_line,
        }
    }

    pub fn error(placeholder: &str) -> Self {
        Self {
            indicator: StatusIndicator::Error,
            duration_line: None,
            timestamp_line: placeholder.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_rendered_verbatim() {
        let update = StatusUpdate::watering(10.0, "x".to_string());
        assert_eq!(update.duration_line.as_deref(), Some("Duração: 10 minutos"));

        let update = StatusUpdate::watering(7.5, "x".to_string());
        assert_eq!(update.duration_line.as_deref(), Some("Duração: 7.5 minutos"));
    }

    #[test]
    fn waiting_clears_duration_and_error_keeps_it() {
        assert_eq!(
            StatusUpdate::waiting("x".to_string()).duration_line.as_deref(),
            Some("")
        );
        assert_eq!(StatusUpdate::error("N/A").duration_line, None);
    }
}
