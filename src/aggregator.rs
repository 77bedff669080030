/// A single named cost component as supplied by the form.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEntry {
    pub name: String,
    /// `None` when the field was left blank
    pub amount: Option<f64>,
}

/// Ordered mapping of cost component name to (optional) amount.
///
/// Fixed and variable components are merged into one sheet by the caller
/// before aggregation. Inserting a name that is already present replaces its
/// amount but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostSheet {
    entries: Vec<CostEntry>,
}

impl CostSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, amount: Option<f64>) {
        let name = name.into();
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == name) {
            existing.amount = amount;
        } else {
            self.entries.push(CostEntry { name, amount });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CostEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<S: Into<String>> FromIterator<(S, Option<f64>)> for CostSheet {
    fn from_iter<I: IntoIterator<Item = (S, Option<f64>)>>(iter: I) -> Self {
        let mut sheet = CostSheet::new();
        for (name, amount) in iter {
            sheet.insert(name, amount);
        }
        sheet
    }
}

/// The cost components that survived filtering, in the order they were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostBreakdown {
    entries: Vec<(String, f64)>,
}

impl CostBreakdown {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Left-to-right sum of the amounts
    pub fn total(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, (_, amount)| acc + amount)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostSummary {
    pub total: f64,
    pub breakdown: CostBreakdown,
}

/// Drop blank and zero entries, keep everything else in input order and sum it.
///
/// Only `None` and values equal to zero are excluded. Negative amounts are
/// not rejected here; the form refuses them before they reach this point.
pub fn aggregate(costs: &CostSheet) -> CostSummary {
    let entries: Vec<(String, f64)> = costs
        .iter()
        .filter_map(|entry| match entry.amount {
            Some(amount) if amount != 0.0 => Some((entry.name.clone(), amount)),
            _ => None,
        })
        .collect();

    let breakdown = CostBreakdown { entries };
    CostSummary {
        total: breakdown.total(),
        breakdown,
    }
}
