//! Iterative message passing engine.
//!
//! This module implements the round loop of min-sum belief propagation:
//! check node phase, convergence test, variable node phase, stagnation
//! guard. The phases run in that strict order within a round, and every
//! per-node update reads only messages written in a previous phase, so the
//! schedule is the synchronous (flooding) one.

use super::Termination;
use crate::graph::TannerGraph;
use crate::message::{MessageStore, SignMagnitude};
use std::collections::VecDeque;

// A stalled min-sum iteration settles into a cycle of period one or two,
// so the guard keeps the snapshots of the last two rounds.
const STAGNATION_WINDOW: usize = 2;

type Snapshot = (MessageStore<SignMagnitude>, MessageStore<f64>);

#[derive(Debug, Clone)]
pub(super) struct BeliefPropagation<'a> {
    graph: &'a TannerGraph,
    llrs: &'a [f64],
    variable_messages: MessageStore<SignMagnitude>,
    check_messages: MessageStore<f64>,
    // Total LLR and hard decision per variable, refreshed every round.
    totals: Vec<f64>,
    hard_decisions: Vec<u8>,
    history: VecDeque<Snapshot>,
}

impl<'a> BeliefPropagation<'a> {
    pub(super) fn new(graph: &'a TannerGraph, llrs: &'a [f64]) -> BeliefPropagation<'a> {
        assert_eq!(llrs.len(), graph.num_variables());
        let mut variable_messages = MessageStore::for_graph(graph);
        // Round 0: every variable sends its channel belief to its checks.
        for v in graph.variable_nodes() {
            for link in graph.links(v) {
                variable_messages.send(link.edge, SignMagnitude::from_value(llrs[v]));
            }
        }
        // Until the first round completes, the channel belief is the best
        // available estimate.
        let hard_decisions = llrs.iter().map(|&llr| u8::from(llr < 0.0)).collect();
        BeliefPropagation {
            graph,
            llrs,
            variable_messages,
            check_messages: MessageStore::for_graph(graph),
            totals: llrs.to_vec(),
            hard_decisions,
            history: VecDeque::with_capacity(STAGNATION_WINDOW),
        }
    }

    /// Runs rounds until a terminal state is reached.
    ///
    /// Returns the terminal state and the number of rounds used.
    pub(super) fn run(&mut self, max_iterations: usize) -> (Termination, usize) {
        for iteration in 1..=max_iterations {
            self.check_phase();
            self.update_totals();
            if self.graph.is_codeword(&self.hard_decisions) {
                return (Termination::Converged, iteration);
            }
            self.variable_phase();
            if self.stagnated() {
                return (Termination::Stalled, iteration);
            }
        }
        (Termination::MaxIterationsExceeded, max_iterations)
    }

    pub(super) fn into_hard_decisions(self) -> Vec<u8> {
        self.hard_decisions
    }

    // Min-sum update: each check tells each neighbor the minimum magnitude
    // among the other incoming messages, with the XOR of their signs.
    fn check_phase(&mut self) {
        for c in self.graph.check_nodes() {
            let links = self.graph.links(c);
            for link in links {
                let mut negative = false;
                let mut magnitude = None;
                for other in links {
                    if other.node == link.node {
                        continue;
                    }
                    let msg = self.variable_messages.get(other.edge);
                    negative ^= msg.negative;
                    magnitude = Some(match magnitude {
                        None => msg.magnitude,
                        Some(m) => msg.magnitude.min(m),
                    });
                }
                // A degree-one check has nothing to report back.
                let value = match magnitude {
                    None => 0.0,
                    Some(m) if negative => -m,
                    Some(m) => m,
                };
                self.check_messages.send(link.edge, value);
            }
        }
    }

    fn update_totals(&mut self) {
        for v in self.graph.variable_nodes() {
            let total = self.llrs[v]
                + self
                    .graph
                    .links(v)
                    .iter()
                    .map(|link| self.check_messages.get(link.edge))
                    .sum::<f64>();
            self.totals[v] = total;
            self.hard_decisions[v] = u8::from(total < 0.0);
        }
    }

    fn variable_phase(&mut self) {
        for v in self.graph.variable_nodes() {
            let links = self.graph.links(v);
            for link in links {
                let total = self.llrs[v]
                    + links
                        .iter()
                        .filter(|other| other.node != link.node)
                        .map(|other| self.check_messages.get(other.edge))
                        .sum::<f64>();
                self.variable_messages
                    .send(link.edge, SignMagnitude::from_value(total));
            }
        }
    }

    // Exact comparison against the previous rounds' messages; a repeat
    // means the iteration can only replay itself from here on.
    fn stagnated(&mut self) -> bool {
        let snapshot = (
            self.variable_messages.snapshot(),
            self.check_messages.snapshot(),
        );
        if self.history.iter().any(|old| *old == snapshot) {
            return true;
        }
        if self.history.len() == STAGNATION_WINDOW {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);
        false
    }
}
