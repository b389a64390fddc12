use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub time_label: String,
    pub duration_label: String,
    pub weekdays_badge: String,
    /// Every row but the last is followed by a divider.
    pub divider: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulePanel {
    Loading,
    Empty,
    Error,
    Rows(Vec<ScheduleRow>),
}

impl SchedulePanel {
    /// Placeholder text for the non-list states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SchedulePanel::Loading => Some("Carregando horários..."),
            SchedulePanel::Empty => Some("Nenhum horário futuro para hoje."),
            SchedulePanel::Error => Some("Erro ao carregar horários."),
            SchedulePanel::Rows(_) => None,
        }
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        match self {
            SchedulePanel::Rows(rows) => rows.as_slice(),
            _ => &[],
        }
    }
}

impl Display for ScheduleRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}  {}  [{}]",
            self.time_label, self.duration_label, self.weekdays_badge
        )
    }
}
