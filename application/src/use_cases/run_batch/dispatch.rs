//! Dispatch planner
//!
//! Decides submission order and grouping. Conversation state on a datasource
//! is only meaningful when a single outstanding sentence can mutate it, so
//! batched submission is reserved for async mode without per-sentence
//! clearing.
//!
//! | clear_conversation | async_mode | Plan |
//! |--------------------|------------|------|
//! | true  | (ignored) | one wave per sentence, each clearing its own datasource |
//! | false | true      | one wave with every sentence, clearing all datasources first |
//! | false | false     | one wave per sentence, clearing all datasources before the first |

use crate::config::TestClientConfig;
use askbatch_domain::DatasourceId;

/// Where a sentence resolved to, after provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedTarget {
    pub datasource_id: DatasourceId,
    pub model_id: Option<String>,
}

/// A group of sentences submitted together and polled together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Wave {
    /// Datasources whose conversation is cleared before submitting
    pub clear: Vec<DatasourceId>,
    /// Sentence indices into the batch
    pub sentences: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DispatchPlan {
    pub waves: Vec<Wave>,
}

/// Builds the dispatch plan for a resolved batch.
pub(crate) fn plan(targets: &[ResolvedTarget], config: &TestClientConfig) -> DispatchPlan {
    if config.clear_conversation {
        let waves = targets
            .iter()
            .enumerate()
            .map(|(index, target)| Wave {
                clear: vec![target.datasource_id],
                sentences: vec![index],
            })
            .collect();
        return DispatchPlan { waves };
    }

    let all_datasources = distinct_datasources(targets);

    if config.async_mode {
        return DispatchPlan {
            waves: vec![Wave {
                clear: all_datasources,
                sentences: (0..targets.len()).collect(),
            }],
        };
    }

    let mut clear = Some(all_datasources);
    let waves = (0..targets.len())
        .map(|index| Wave {
            clear: clear.take().unwrap_or_default(),
            sentences: vec![index],
        })
        .collect();

    DispatchPlan { waves }
}

fn distinct_datasources(targets: &[ResolvedTarget]) -> Vec<DatasourceId> {
    let mut ids = Vec::new();
    for target in targets {
        if !ids.contains(&target.datasource_id) {
            ids.push(target.datasource_id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(ids: &[i64]) -> Vec<ResolvedTarget> {
        ids.iter()
            .map(|id| ResolvedTarget {
                datasource_id: DatasourceId::new(*id),
                model_id: None,
            })
            .collect()
    }

    fn ds(ids: &[i64]) -> Vec<DatasourceId> {
        ids.iter().map(|id| DatasourceId::new(*id)).collect()
    }

    #[test]
    fn test_clear_per_sentence_ignores_async_mode() {
        for async_mode in [true, false] {
            let config = TestClientConfig::default()
                .with_clear_conversation(true)
                .with_async_mode(async_mode);
            let plan = plan(&targets(&[1, 2, 1]), &config);

            assert_eq!(
                plan.waves,
                vec![
                    Wave { clear: ds(&[1]), sentences: vec![0] },
                    Wave { clear: ds(&[2]), sentences: vec![1] },
                    Wave { clear: ds(&[1]), sentences: vec![2] },
                ]
            );
        }
    }

    #[test]
    fn test_async_mode_single_wave() {
        let config = TestClientConfig::default().with_async_mode(true);
        let plan = plan(&targets(&[1, 2, 1]), &config);

        assert_eq!(
            plan.waves,
            vec![Wave { clear: ds(&[1, 2]), sentences: vec![0, 1, 2] }]
        );
    }

    #[test]
    fn test_sync_mode_clears_once_then_one_at_a_time() {
        let config = TestClientConfig::default().with_async_mode(false);
        let plan = plan(&targets(&[3, 1, 3]), &config);

        assert_eq!(
            plan.waves,
            vec![
                Wave { clear: ds(&[3, 1]), sentences: vec![0] },
                Wave { clear: vec![], sentences: vec![1] },
                Wave { clear: vec![], sentences: vec![2] },
            ]
        );
    }
}
