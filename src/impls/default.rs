use core::marker::PhantomData;

use crate::algo::circulation::cancel_circulations;
use crate::algo::edmonds_karp::EdmondsKarp;
use crate::algo::{MaxFlow, MaxFlowResult};
use crate::amount::Amount;
use crate::config::Config;
use crate::error::Error;
use crate::id::Id;
use crate::network::FlowNetwork;
use crate::transfer::{self, TransferPlan};
use crate::{Pathfinder, Snapshot};

/// Pathfinder over a snapshot whose accounts are already dense node indices.
#[derive(Clone, Debug)]
pub struct DefaultPathfinder<TokenId> {
    config: Config,
    _phantom: PhantomData<TokenId>,
}

impl<TokenId> DefaultPathfinder<TokenId> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            _phantom: PhantomData,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<TokenId> Default for DefaultPathfinder<TokenId> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<TokenId: Id> Pathfinder for DefaultPathfinder<TokenId> {
    type AccountId = usize;
    type TokenId = TokenId;
    type Edges = Snapshot<TokenId>;
    type Error = Error;

    fn find_path(
        &mut self,
        snapshot: Self::Edges,
        source: &usize,
        sink: &usize,
        value: &Amount,
    ) -> Result<TransferPlan<usize, TokenId>, Self::Error> {
        self.config.validate()?;

        let mut network = FlowNetwork::new(snapshot.node_count, snapshot.edges)?;
        network.check_node(*source)?;
        network.check_node(*sink)?;

        let mut algo = EdmondsKarp::from_config(&self.config);
        if self.config.trim_to_requested {
            algo = algo.with_target(value.clone());
        }
        let MaxFlowResult {
            value: max_flow,
            commits,
        } = algo.max_flow(&mut network, *source, *sink)?;

        if max_flow < *value {
            log::info!("insufficient flow {source} -> {sink}: {max_flow} < {value}");
            return Err(Error::InsufficientFlow {
                max_flow,
                requested: value.clone(),
            });
        }

        cancel_circulations(&mut network);
        let steps = transfer::synthesize(&network, &commits, *source)?;

        log::info!("----------------------------------");
        log::info!("      Requested = {value}");
        log::info!("       Max flow = {max_flow}");
        log::info!("Transfer steps  = {}", steps.len());

        if steps.len() > self.config.max_steps {
            return Err(Error::StepLimitExceeded {
                steps: steps.len(),
                max_steps: self.config.max_steps,
            });
        }

        Ok(TransferPlan {
            max_flow_value: max_flow,
            transfer_steps: steps,
        })
    }

    fn check(
        &self,
        plan: &TransferPlan<usize, TokenId>,
        source: &usize,
        sink: &usize,
    ) -> Result<(), Self::Error> {
        transfer::verify(&plan.transfer_steps, source, sink, &plan.max_flow_value)?;

        log::debug!("       Max flow: {}", plan.max_flow_value);
        log::debug!("          Steps: {}", plan.transfer_steps.len());

        Ok(())
    }
}
