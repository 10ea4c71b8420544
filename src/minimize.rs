//! Request boundary: one call from input to a complete, serializable result.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::cover::{minimal_cover, Cover};
use crate::error::Result;
use crate::expression::parse;
use crate::grid::Grid;
use crate::implicant::Implicant;
use crate::primes::prime_implicants;
use crate::sop::{sop, term, Notation};
use crate::truth_table::TruthTable;
use crate::variables::VariableSet;

/// Where the function comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Input {
    /// A boolean expression; `dont_cares` are indices whose value is free.
    Expression {
        text: String,
        #[serde(default)]
        dont_cares: Vec<u32>,
    },
    /// Explicit index lists. Without declared variables, `variable_count`
    /// names them `A..`; if that is missing too, the smallest count that holds
    /// every index is used.
    Terms {
        minterms: Vec<u32>,
        #[serde(default)]
        dont_cares: Vec<u32>,
        #[serde(default)]
        variable_count: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimizeRequest {
    pub input: Input,
    /// Ordered variable names, most significant first. Detected from the
    /// expression when absent.
    #[serde(default)]
    pub variables: Option<Vec<String>>,
}

impl MinimizeRequest {
    pub fn expression(text: impl Into<String>) -> Self {
        MinimizeRequest {
            input: Input::Expression {
                text: text.into(),
                dont_cares: Vec::new(),
            },
            variables: None,
        }
    }

    pub fn terms(minterms: &[u32], dont_cares: &[u32]) -> Self {
        MinimizeRequest {
            input: Input::Terms {
                minterms: minterms.to_vec(),
                dont_cares: dont_cares.to_vec(),
                variable_count: None,
            },
            variables: None,
        }
    }

    pub fn with_variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_variable_count(mut self, n: usize) -> Self {
        if let Input::Terms { variable_count, .. } = &mut self.input {
            *variable_count = Some(n);
        }
        self
    }

    pub fn with_dont_cares(mut self, indices: &[u32]) -> Self {
        match &mut self.input {
            Input::Expression { dont_cares, .. } | Input::Terms { dont_cares, .. } => {
                *dont_cares = indices.to_vec()
            }
        }
        self
    }
}

/// Read-only settings shared by every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Notation of `expression` and of the group terms
    pub notation: Notation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimeImplicant {
    pub id: usize,
    pub value: u32,
    pub mask: u32,
    /// Covered assignment indices, ones and don't-cares alike
    pub covers: Vec<u32>,
    pub literal_count: usize,
    pub term: String,
    pub essential: bool,
}

impl PrimeImplicant {
    pub fn implicant(&self) -> Implicant {
        Implicant::new(self.value, self.mask)
    }
}

/// Everything derived from one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Minimization {
    pub variables: VariableSet,
    pub truth_table: TruthTable,
    pub prime_implicants: Vec<PrimeImplicant>,
    pub essential: Vec<usize>,
    pub cover: Vec<usize>,
    /// The minimal sum of products, `0` or `1` for constants
    pub expression: String,
    pub grid: Grid,
}

impl Minimization {
    /// The selected implicants, in cover order.
    pub fn cover_implicants(&self) -> Vec<Implicant> {
        self.cover
            .iter()
            .map(|&id| self.prime_implicants[id].implicant())
            .collect()
    }

    /// `(implicant count, literal count)` of the cover.
    pub fn cost(&self) -> (usize, usize) {
        let literals = self
            .cover
            .iter()
            .map(|&id| self.prime_implicants[id].literal_count)
            .sum();
        (self.cover.len(), literals)
    }

    /// The minimal expression in another notation.
    pub fn render(&self, notation: Notation) -> String {
        sop(&self.cover_implicants(), &self.variables, notation)
    }
}

fn declared(request: &MinimizeRequest) -> Result<Option<VariableSet>> {
    request
        .variables
        .as_ref()
        .map(|names| VariableSet::new(names.iter().cloned()))
        .transpose()
}

/// Smallest variable count whose index range holds every listed index.
fn inferred_count(minterms: &[u32], dont_cares: &[u32]) -> usize {
    let max = minterms.iter().chain(dont_cares).copied().max().unwrap_or(0);
    (u32::BITS - max.leading_zeros()).max(1) as usize
}

/// This function minimizes the boolean function described by `request`
///
/// # Arguments
/// * `request` - An expression or index lists, plus optional variable names
/// * `options` - Output settings
///
/// # Output
/// The truth table, every prime implicant, the essential and selected ones,
/// the minimal sum of products and the K-map layout, or the first error found.
///
/// # Examples
/// ```
/// use kmap_sop::{minimize, MinimizeRequest, Options};
///
/// let request = MinimizeRequest::terms(&[0, 1, 2, 3, 4, 5, 6, 7], &[8, 9, 10, 11])
///     .with_variable_count(4);
/// let result = minimize(&request, &Options::default()).unwrap();
/// assert_eq!(result.expression, "!A");
/// assert_eq!(result.cover.len(), 1);
///
/// let request = MinimizeRequest::expression("a'b + ab'");
/// let result = minimize(&request, &Options::default()).unwrap();
/// assert_eq!(result.expression, "A.!B + !A.B");
/// assert_eq!(result.essential.len(), 2);
/// ```
pub fn minimize(request: &MinimizeRequest, options: &Options) -> Result<Minimization> {
    let declared = declared(request)?;

    let (variables, table) = match &request.input {
        Input::Expression { text, dont_cares } => {
            let parsed = parse(text, declared.as_ref())?;
            let table =
                TruthTable::from_expression(&parsed.expr, parsed.variables.len(), dont_cares)?;
            (parsed.variables, table)
        }
        Input::Terms {
            minterms,
            dont_cares,
            variable_count,
        } => {
            let variables = match declared {
                Some(vars) => vars,
                None => VariableSet::alphabetic(
                    variable_count.unwrap_or_else(|| inferred_count(minterms, dont_cares)),
                )?,
            };
            let table = TruthTable::from_terms(variables.len(), minterms, dont_cares)?;
            (variables, table)
        }
    };
    let n_variables = variables.len();

    let primes = prime_implicants(&table);
    let cover: Cover = minimal_cover(&primes, &table);
    let selected: Vec<Implicant> = cover.selected.iter().map(|&id| primes[id]).collect();
    let expression = sop(&selected, &variables, options.notation);
    let grid = Grid::new(&table, &primes, &cover, &variables, options.notation);

    let prime_implicants = primes
        .iter()
        .enumerate()
        .map(|(id, p)| PrimeImplicant {
            id,
            value: p.value,
            mask: p.mask,
            covers: p.covered(n_variables),
            literal_count: p.literal_count(n_variables),
            term: term(p, &variables, options.notation),
            essential: cover.essential.contains(&id),
        })
        .collect();

    debug!("cover cost {:?}", cover.cost(&primes, n_variables));
    info!("F({}) = {}", variables, expression);

    Ok(Minimization {
        variables,
        truth_table: table,
        prime_implicants,
        essential: cover.essential,
        cover: cover.selected,
        expression,
        grid,
    })
}
