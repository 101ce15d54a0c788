use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Local};
use normkit_core::{FunctionalDependency, Problem};
use rand::distr::{Distribution, Uniform};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, Default, Deserialize, Serialize, TypedBuilder)]
pub struct ProblemParams {
    pub id: u64,
    pub n_attribute: u64,
    pub n_dependency: u64,
    /// Upper bound on left-hand side size.
    #[builder(default = 2)]
    pub max_lhs: u64,
    /// Upper bound on right-hand side size.
    #[builder(default = 1)]
    pub max_rhs: u64,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Instance {
    params: ProblemParams,
    info: String,
    start: DateTime<Local>,
    end: DateTime<Local>,
    data: Problem<String>,
}

impl Instance {
    #[must_use]
    pub const fn get_id(&self) -> u64 {
        self.params.id
    }

    #[must_use]
    pub const fn get_data(&self) -> &Problem<String> {
        &self.data
    }

    #[must_use]
    pub const fn get_params(&self) -> &ProblemParams {
        &self.params
    }

    #[must_use]
    pub fn get_duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Name of the attribute at `index`: `A` to `Z`, then `A1` to `Z1`, `A2`, ...
///
/// The first 26 names are single characters, so problems with at most 26
/// attributes can be written in the compact notation.
#[must_use]
pub fn attribute_name(index: u64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let letter = char::from(b'A' + (index % 26) as u8);
    let round = index / 26;
    if round == 0 {
        letter.to_string()
    } else {
        format!("{letter}{round}")
    }
}

/// Draw `amount` distinct values from `pool`.
fn pick<R>(random_generator: &mut R, pool: &[u64], amount: usize) -> BTreeSet<u64>
where
    R: rand::Rng + ?Sized,
{
    let index_range = Uniform::new(0, pool.len()).unwrap();
    let mut picked = BTreeSet::new();
    while picked.len() < amount {
        picked.insert(pool[index_range.sample(random_generator)]);
    }
    picked
}

/// Generate a single problem over `n_attribute` attributes with
/// `n_dependency` random dependencies.
///
/// Every dependency stays inside the schema. Its left-hand side has between 1
/// and `max_lhs` attributes, its right-hand side between 1 and `max_rhs`.
/// Right-hand sides avoid the left-hand side attributes unless the left-hand
/// side already covers the whole schema, so dependencies are never trivial
/// when they can help it.
///
/// A `max_lhs` or `max_rhs` of zero is treated as one. Without attributes
/// there is nothing to draw from, so the problem has no dependencies.
#[must_use]
pub fn generate_single_problem(
    n_attribute: u64,
    n_dependency: u64,
    max_lhs: u64,
    max_rhs: u64,
) -> Problem<String> {
    let mut random_generator = rand::rng();
    let attributes: Vec<u64> = (0..n_attribute).collect();

    let n_dependency = if n_attribute == 0 { 0 } else { n_dependency };

    let dependencies = (0..n_dependency)
        .map(|_| {
            let lhs_size = Uniform::new_inclusive(1, max_lhs.clamp(1, n_attribute))
                .unwrap()
                .sample(&mut random_generator);
            #[allow(clippy::cast_possible_truncation)]
            let lhs = pick(&mut random_generator, &attributes, lhs_size as usize);

            let mut rest: Vec<u64> = attributes
                .iter()
                .copied()
                .filter(|attribute| !lhs.contains(attribute))
                .collect();
            if rest.is_empty() {
                rest.clone_from(&attributes);
            }

            let rhs_size = Uniform::new_inclusive(1, max_rhs.clamp(1, rest.len() as u64))
                .unwrap()
                .sample(&mut random_generator);
            #[allow(clippy::cast_possible_truncation)]
            let rhs = pick(&mut random_generator, &rest, rhs_size as usize);

            FunctionalDependency {
                lhs: lhs.into_iter().map(attribute_name).collect(),
                rhs: rhs.into_iter().map(attribute_name).collect(),
            }
        })
        .collect();

    Problem::new((0..n_attribute).map(attribute_name).collect(), dependencies)
}

#[must_use]
pub fn generate_mult_problems(
    n_problem: u64,
    n_attribute: u64,
    n_dependency: u64,
    max_lhs: u64,
    max_rhs: u64,
) -> Vec<Instance> {
    (0..n_problem)
        .into_par_iter()
        .map(|i_problem| {
            let start_time = Local::now();
            let problem = generate_single_problem(n_attribute, n_dependency, max_lhs, max_rhs);
            let end_time = Local::now();
            Instance {
                params: ProblemParams::builder()
                    .id(i_problem)
                    .n_attribute(n_attribute)
                    .n_dependency(n_dependency)
                    .max_lhs(max_lhs)
                    .max_rhs(max_rhs)
                    .build(),
                info: "generated".to_string(),
                start: start_time,
                end: end_time,
                data: problem,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names() {
        assert_eq!(attribute_name(0), "A");
        assert_eq!(attribute_name(25), "Z");
        assert_eq!(attribute_name(26), "A1");
        assert_eq!(attribute_name(53), "B2");
    }

    #[test]
    fn test_generated_dependencies_stay_inside_schema() {
        let problem = generate_single_problem(6, 20, 3, 2);
        assert_eq!(problem.relation.len(), 6);
        assert_eq!(problem.dependencies.len(), 20);

        for dependency in &problem.dependencies {
            assert!((1..=3).contains(&dependency.lhs.len()), "{dependency}");
            assert!((1..=2).contains(&dependency.rhs.len()), "{dependency}");
            assert!(dependency.lhs.is_subset(&problem.relation));
            assert!(dependency.rhs.is_subset(&problem.relation));
            assert!(dependency.lhs.is_disjoint(&dependency.rhs), "{dependency}");
        }
    }

    #[test]
    fn test_left_hand_side_covering_schema() {
        let problem = generate_single_problem(1, 5, 4, 4);
        for dependency in &problem.dependencies {
            assert_eq!(dependency.lhs, dependency.rhs);
        }
    }

    #[test]
    fn test_zero_sizes_do_not_panic() {
        let problem = generate_single_problem(0, 3, 2, 1);
        assert!(problem.relation.is_empty());
        assert!(problem.dependencies.is_empty());

        for (max_lhs, max_rhs) in [(0, 1), (2, 0), (0, 0)] {
            let problem = generate_single_problem(3, 4, max_lhs, max_rhs);
            assert_eq!(problem.dependencies.len(), 4);
            for dependency in &problem.dependencies {
                assert!(dependency.lhs.len() <= max_lhs.max(1) as usize, "{dependency}");
                assert!(dependency.rhs.len() <= max_rhs.max(1) as usize, "{dependency}");
            }
        }
    }

    #[test]
    fn test_no_dependencies() {
        let problem = generate_single_problem(0, 0, 0, 0);
        assert!(problem.relation.is_empty());
        assert!(problem.dependencies.is_empty());
    }

    #[test]
    fn test_mult_problems_have_ids_and_params() {
        let mut instances = generate_mult_problems(4, 5, 3, 2, 1);
        instances.sort_by_key(Instance::get_id);

        let ids: Vec<u64> = instances.iter().map(Instance::get_id).collect();
        assert_eq!(ids, [0, 1, 2, 3]);
        for instance in &instances {
            assert_eq!(instance.get_params().n_attribute, 5);
            assert_eq!(instance.get_data().dependencies.len(), 3);
            assert!(instance.get_duration() >= Duration::zero());
        }
    }

    #[test]
    fn test_instance_json_shape() {
        let instance = generate_mult_problems(1, 3, 2, 1, 1).remove(0);
        let value = serde_json::to_value(&instance).unwrap();
        assert_eq!(value["params"]["n_attribute"], 3);
        assert_eq!(value["data"]["relation"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(value["data"]["dependencies"].as_array().unwrap().len(), 2);
    }
}
