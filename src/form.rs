use crate::aggregator::CostSheet;
use crate::config::Cli;
use crate::error::InputError;

/// Upper bound on the number of user-defined "Variable Cost N" fields
pub const MAX_VARIABLE_COSTS: usize = 20;

/// The predefined cost components, in the order they appear on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedCost {
    Base,
    Overhead,
    Depreciation,
    Environmental,
    Transportation,
    Labor,
    Material,
    Machinery,
    Fuel,
    Maintenance,
}

impl FixedCost {
    pub const ALL: [FixedCost; 10] = [
        FixedCost::Base,
        FixedCost::Overhead,
        FixedCost::Depreciation,
        FixedCost::Environmental,
        FixedCost::Transportation,
        FixedCost::Labor,
        FixedCost::Material,
        FixedCost::Machinery,
        FixedCost::Fuel,
        FixedCost::Maintenance,
    ];

    /// Name the component is aggregated and displayed under
    pub fn key(self) -> &'static str {
        match self {
            FixedCost::Base => "base_cost",
            FixedCost::Overhead => "overhead_cost",
            FixedCost::Depreciation => "depreciation_cost",
            FixedCost::Environmental => "environmental_cost",
            FixedCost::Transportation => "transportation_cost",
            FixedCost::Labor => "labor_cost",
            FixedCost::Material => "material_cost",
            FixedCost::Machinery => "machinery_cost",
            FixedCost::Fuel => "fuel_cost",
            FixedCost::Maintenance => "maintenance_cost",
        }
    }

    /// Human label shown next to the input field
    pub fn label(self) -> &'static str {
        match self {
            FixedCost::Base => "Base Cost",
            FixedCost::Overhead => "Overhead Cost",
            FixedCost::Depreciation => "Depreciation Cost",
            FixedCost::Environmental => "Environmental Impact Cost",
            FixedCost::Transportation => "Transportation Cost",
            FixedCost::Labor => "Labor Cost",
            FixedCost::Material => "Material Cost",
            FixedCost::Machinery => "Machinery Cost",
            FixedCost::Fuel => "Fuel Cost",
            FixedCost::Maintenance => "Maintenance Cost",
        }
    }

    pub fn index(self) -> usize {
        FixedCost::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// 1-based name of a variable cost component
pub fn variable_cost_name(number: usize) -> String {
    format!("Variable Cost {}", number)
}

/// Plain snapshot of everything the user entered.
///
/// Variable amounts beyond the current count are remembered so that shrinking
/// and re-growing the count does not lose what was typed, but they are never
/// handed to the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct CostForm {
    fixed: [Option<f64>; 10],
    variable: [Option<f64>; MAX_VARIABLE_COSTS],
    variable_count: usize,
}

impl Default for CostForm {
    fn default() -> Self {
        Self {
            fixed: [None; 10],
            variable: [None; MAX_VARIABLE_COSTS],
            variable_count: 0,
        }
    }
}

impl CostForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from command-line flags
    pub fn from_cli(cli: &Cli) -> Result<Self, InputError> {
        let mut form = CostForm::new();
        let flags = [
            (FixedCost::Base, cli.base),
            (FixedCost::Overhead, cli.overhead),
            (FixedCost::Depreciation, cli.depreciation),
            (FixedCost::Environmental, cli.environmental),
            (FixedCost::Transportation, cli.transportation),
            (FixedCost::Labor, cli.labor),
            (FixedCost::Material, cli.material),
            (FixedCost::Machinery, cli.machinery),
            (FixedCost::Fuel, cli.fuel),
            (FixedCost::Maintenance, cli.maintenance),
        ];
        for (cost, amount) in flags {
            form.set_fixed(cost, amount);
        }

        let given = cli.variable.len();
        let count = cli.variable_count.map(usize::from).unwrap_or(given);
        let allowed = count.min(MAX_VARIABLE_COSTS);
        if given > allowed {
            return Err(InputError::TooManyVariableCosts { given, allowed });
        }
        form.set_variable_count(count);
        for (i, amount) in cli.variable.iter().enumerate() {
            form.set_variable(i + 1, Some(*amount))?;
        }
        Ok(form)
    }

    pub fn fixed(&self, cost: FixedCost) -> Option<f64> {
        self.fixed[cost.index()]
    }

    pub fn set_fixed(&mut self, cost: FixedCost, amount: Option<f64>) {
        self.fixed[cost.index()] = amount;
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Change how many variable cost fields are active. Returns the clamped count.
    pub fn set_variable_count(&mut self, count: usize) -> usize {
        self.variable_count = count.min(MAX_VARIABLE_COSTS);
        self.variable_count
    }

    /// Amount of variable cost `number` (1-based), if it is active
    pub fn variable(&self, number: usize) -> Option<f64> {
        if number == 0 || number > self.variable_count {
            return None;
        }
        self.variable[number - 1]
    }

    pub fn set_variable(&mut self, number: usize, amount: Option<f64>) -> Result<(), InputError> {
        if number == 0 || number > self.variable_count {
            return Err(InputError::VariableIndexOutOfRange {
                index: number,
                count: self.variable_count,
            });
        }
        self.variable[number - 1] = amount;
        Ok(())
    }

    /// Merge fixed then active variable components into one ordered sheet
    pub fn to_sheet(&self) -> CostSheet {
        let fixed = FixedCost::ALL
            .iter()
            .map(|cost| (cost.key().to_string(), self.fixed(*cost)));
        let variable = (1..=self.variable_count).map(|n| (variable_cost_name(n), self.variable(n)));
        fixed.chain(variable).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;
    use clap::Parser;

    #[test]
    fn test_sheet_order_fixed_then_variable() {
        let mut form = CostForm::new();
        form.set_variable_count(2);
        let sheet = form.to_sheet();
        let names: Vec<&str> = sheet.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "base_cost");
        assert_eq!(names[9], "maintenance_cost");
        assert_eq!(names[10], "Variable Cost 1");
        assert_eq!(names[11], "Variable Cost 2");
    }

    #[test]
    fn test_variable_count_clamped() {
        let mut form = CostForm::new();
        assert_eq!(form.set_variable_count(35), MAX_VARIABLE_COSTS);
        assert_eq!(form.variable_count(), 20);
    }

    #[test]
    fn test_shrinking_count_hides_but_keeps_values() {
        let mut form = CostForm::new();
        form.set_variable_count(3);
        form.set_variable(3, Some(42.0)).unwrap();
        form.set_variable_count(1);
        assert_eq!(form.variable(3), None);
        assert_eq!(form.to_sheet().len(), 11);
        form.set_variable_count(3);
        assert_eq!(form.variable(3), Some(42.0));
    }

    #[test]
    fn test_set_variable_out_of_range() {
        let mut form = CostForm::new();
        form.set_variable_count(2);
        assert_eq!(
            form.set_variable(3, Some(1.0)),
            Err(InputError::VariableIndexOutOfRange { index: 3, count: 2 })
        );
        assert!(form.set_variable(0, Some(1.0)).is_err());
    }

    #[test]
    fn test_form_aggregates_like_the_calculator() {
        let mut form = CostForm::new();
        form.set_fixed(FixedCost::Base, Some(1000.0));
        form.set_fixed(FixedCost::Labor, Some(250.5));
        form.set_fixed(FixedCost::Fuel, Some(0.0));
        form.set_variable_count(2);
        form.set_variable(2, Some(49.5)).unwrap();

        let summary = aggregate(&form.to_sheet());
        assert_eq!(summary.total, 1300.0);
        assert_eq!(
            summary.breakdown.names(),
            vec!["base_cost", "labor_cost", "Variable Cost 2"]
        );
    }

    #[test]
    fn test_from_cli() {
        let cli = Cli::parse_from([
            "cost-estimator",
            "--base",
            "500",
            "--machinery",
            "1,200",
            "--variable",
            "10",
            "--variable",
            "20",
        ]);
        let form = CostForm::from_cli(&cli).unwrap();
        assert_eq!(form.fixed(FixedCost::Base), Some(500.0));
        assert_eq!(form.fixed(FixedCost::Machinery), Some(1200.0));
        assert_eq!(form.fixed(FixedCost::Labor), None);
        assert_eq!(form.variable_count(), 2);
        assert_eq!(form.variable(2), Some(20.0));
    }

    #[test]
    fn test_from_cli_count_larger_than_values() {
        let cli = Cli::parse_from(["cost-estimator", "--variable-count", "4", "--variable", "7"]);
        let form = CostForm::from_cli(&cli).unwrap();
        assert_eq!(form.variable_count(), 4);
        assert_eq!(form.variable(1), Some(7.0));
        assert_eq!(form.variable(4), None);
    }

    #[test]
    fn test_from_cli_too_many_values() {
        let cli = Cli::parse_from([
            "cost-estimator",
            "--variable-count",
            "1",
            "--variable",
            "7",
            "--variable",
            "8",
        ]);
        assert_eq!(
            CostForm::from_cli(&cli),
            Err(InputError::TooManyVariableCosts { given: 2, allowed: 1 })
        );
    }
}
