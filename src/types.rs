use chrono::{DateTime, Local};
use crate::aggregator::{aggregate, CostSummary};
use crate::config::SavedConfig;
use crate::error::InputError;
use crate::form::{variable_cost_name, CostForm, FixedCost, MAX_VARIABLE_COSTS};
use crate::ui::utils::{format_amount, parse_amount, parse_count};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Form,
    Results,
}

/// One editable row of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Fixed(FixedCost),
    VariableCount,
    /// 1-based
    Variable(usize),
}

impl FormField {
    pub fn label(&self) -> String {
        match self {
            FormField::Fixed(cost) => cost.label().to_string(),
            FormField::VariableCount => "Number of additional variable costs".to_string(),
            FormField::Variable(n) => variable_cost_name(*n),
        }
    }

    pub fn is_amount(&self) -> bool {
        !matches!(self, FormField::VariableCount)
    }
}

pub struct App {
    pub mode: AppMode,
    pub prefs: SavedConfig,
    fixed_inputs: Vec<String>,
    count_input: String,
    variable_inputs: Vec<String>,
    pub focus: usize,
    pub summary: Option<CostSummary>,
    /// Highlighted breakdown row on the results view
    pub results_row: usize,
    pub calculated_at: Option<DateTime<Local>>,
    pub notification: Option<String>,
}

impl App {
    pub fn new(prefs: SavedConfig, form: &CostForm) -> Self {
        let show = |amount: Option<f64>| amount.map(format_amount).unwrap_or_default();
        let fixed_inputs = FixedCost::ALL.iter().map(|c| show(form.fixed(*c))).collect();
        let mut variable_inputs = vec![String::new(); MAX_VARIABLE_COSTS];
        for (i, input) in variable_inputs.iter_mut().enumerate() {
            *input = show(form.variable(i + 1));
        }
        App {
            mode: AppMode::Form,
            prefs,
            fixed_inputs,
            count_input: form.variable_count().to_string(),
            variable_inputs,
            focus: 0,
            summary: None,
            results_row: 0,
            calculated_at: None,
            notification: None,
        }
    }

    pub fn variable_count(&self) -> usize {
        parse_count(&self.count_input)
    }

    /// Visible rows, in display order
    pub fn fields(&self) -> Vec<FormField> {
        FixedCost::ALL
            .iter()
            .map(|c| FormField::Fixed(*c))
            .chain(std::iter::once(FormField::VariableCount))
            .chain((1..=self.variable_count()).map(FormField::Variable))
            .collect()
    }

    pub fn focused_field(&self) -> FormField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn input(&self, field: FormField) -> &str {
        match field {
            FormField::Fixed(cost) => &self.fixed_inputs[cost.index()],
            FormField::VariableCount => &self.count_input,
            FormField::Variable(n) => &self.variable_inputs[n - 1],
        }
    }

    pub fn input_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Fixed(cost) => &mut self.fixed_inputs[cost.index()],
            FormField::VariableCount => &mut self.count_input,
            FormField::Variable(n) => &mut self.variable_inputs[n - 1],
        }
    }

    pub fn focus_next(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + 1) % len;
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Keep the focus on a visible row after the count shrinks
    pub fn clamp_focus(&mut self) {
        let len = self.fields().len();
        if self.focus >= len {
            self.focus = len - 1;
        }
    }

    pub fn adjust_variable_count(&mut self, delta: isize) {
        let count = self
            .variable_count()
            .saturating_add_signed(delta)
            .min(MAX_VARIABLE_COSTS);
        self.count_input = count.to_string();
        self.clamp_focus();
    }

    /// Read the text buffers into a plain form. On failure returns the row to focus.
    pub fn read_form(&self) -> Result<CostForm, (usize, InputError)> {
        let mut form = CostForm::new();
        form.set_variable_count(self.variable_count());
        for (row, field) in self.fields().into_iter().enumerate() {
            if !field.is_amount() {
                continue;
            }
            let amount = parse_amount(self.input(field))
                .map_err(|e| (row, e.for_field(&field.label())))?;
            match field {
                FormField::Fixed(cost) => form.set_fixed(cost, amount),
                FormField::Variable(n) => form.set_variable(n, amount).map_err(|e| (row, e))?,
                FormField::VariableCount => {}
            }
        }
        Ok(form)
    }

    /// Aggregate the current inputs and switch to the results view
    pub fn calculate(&mut self) {
        match self.read_form() {
            Ok(form) => {
                let sheet = form.to_sheet();
                let summary = aggregate(&sheet);
                tracing::info!(
                    entries = sheet.len(),
                    components = summary.breakdown.len(),
                    total = summary.total,
                    "calculated total cost"
                );
                tracing::debug!(names = ?summary.breakdown.names(), "breakdown components");
                self.summary = Some(summary);
                self.results_row = 0;
                self.calculated_at = Some(Local::now());
                self.notification = None;
                self.mode = AppMode::Results;
            }
            Err((row, e)) => {
                tracing::debug!(row, error = %e, "rejected form input");
                self.notification = Some(format!("❌ {}", e));
                self.focus = row;
            }
        }
    }

    pub fn select_next_result(&mut self) {
        let len = self.summary.as_ref().map_or(0, |s| s.breakdown.len());
        if self.results_row + 1 < len {
            self.results_row += 1;
        }
    }

    pub fn select_prev_result(&mut self) {
        self.results_row = self.results_row.saturating_sub(1);
    }

    pub fn back_to_form(&mut self) {
        self.mode = AppMode::Form;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(SavedConfig::default(), &CostForm::new())
    }

    #[test]
    fn test_rows_follow_variable_count() {
        let mut app = app();
        assert_eq!(app.fields().len(), 11);
        app.adjust_variable_count(3);
        assert_eq!(app.fields().len(), 14);
        assert_eq!(app.fields()[13], FormField::Variable(3));
        app.adjust_variable_count(-10);
        assert_eq!(app.variable_count(), 0);
        app.adjust_variable_count(50);
        assert_eq!(app.variable_count(), MAX_VARIABLE_COSTS);
    }

    #[test]
    fn test_focus_clamped_when_rows_disappear() {
        let mut app = app();
        app.adjust_variable_count(2);
        app.focus = 12;
        app.adjust_variable_count(-2);
        assert_eq!(app.focus, 10);
        assert_eq!(app.focused_field(), FormField::VariableCount);
    }

    #[test]
    fn test_calculate_switches_to_results() {
        let mut app = app();
        app.input_mut(FormField::Fixed(FixedCost::Base)).push_str("100");
        app.input_mut(FormField::Fixed(FixedCost::Fuel)).push_str("0");
        app.adjust_variable_count(1);
        app.input_mut(FormField::Variable(1)).push_str("25.5");

        app.calculate();
        assert_eq!(app.mode, AppMode::Results);
        let summary = app.summary.as_ref().unwrap();
        assert_eq!(summary.total, 125.5);
        assert_eq!(summary.breakdown.names(), vec!["base_cost", "Variable Cost 1"]);
    }

    #[test]
    fn test_invalid_input_focuses_field() {
        let mut app = app();
        app.input_mut(FormField::Fixed(FixedCost::Labor)).push_str("12x");
        app.calculate();
        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.focus, 5);
        let notice = app.notification.as_deref().unwrap();
        assert!(notice.contains("Labor Cost"));
        assert!(app.summary.is_none());
    }

    #[test]
    fn test_all_blank_gives_empty_summary() {
        let mut app = app();
        app.calculate();
        let summary = app.summary.as_ref().unwrap();
        assert_eq!(summary.total, 0.0);
        assert!(summary.breakdown.is_empty());
    }

    #[test]
    fn test_prefilled_from_form() {
        let mut form = CostForm::new();
        form.set_fixed(FixedCost::Material, Some(75.0));
        form.set_variable_count(1);
        form.set_variable(1, Some(5.0)).unwrap();
        let app = App::new(SavedConfig::default(), &form);
        assert_eq!(app.input(FormField::Fixed(FixedCost::Material)), "75.00");
        assert_eq!(app.input(FormField::Variable(1)), "5.00");
        assert_eq!(app.variable_count(), 1);
    }
}
