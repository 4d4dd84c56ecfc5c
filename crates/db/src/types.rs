use chrono::NaiveDate;
use costs_core::Session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionOrder {
    #[default]
    Insertion,
    DateAsc,
    /// Newest first; rows created in the same instant come back newest-inserted first.
    CreatedAtDesc,
}

/// Filtered select over the session log. All predicates are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub date_eq: Option<NaiveDate>,
    pub date_gte: Option<NaiveDate>,
    pub date_lte: Option<NaiveDate>,
    pub date_lt: Option<NaiveDate>,
    pub order: SessionOrder,
    pub limit: Option<u32>,
}

impl SessionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date_eq = Some(date);
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.date_gte = Some(date);
        self
    }

    pub fn through(mut self, date: NaiveDate) -> Self {
        self.date_lte = Some(date);
        self
    }

    pub fn before(mut self, date: NaiveDate) -> Self {
        self.date_lt = Some(date);
        self
    }

    pub fn ordered(mut self, order: SessionOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limited(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, session: &Session) -> bool {
        let date = session.date;
        self.date_eq.is_none_or(|value| date == value)
            && self.date_gte.is_none_or(|value| date >= value)
            && self.date_lte.is_none_or(|value| date <= value)
            && self.date_lt.is_none_or(|value| date < value)
    }
}
