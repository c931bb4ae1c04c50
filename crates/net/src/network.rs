//! Peer networks: many machines exchanging addressed packets.
//!
//! Each peer boots with its own address as its first input. A peer sends a
//! packet by emitting three values: destination, `x`, `y`. When a peer asks
//! for input, it receives the `x, y` of the next packet queued for it, or
//! `-1` if there is none. Packets addressed outside the peer set are captured
//! by the [`Sink`], a supervisory node that can also wake the network up when
//! it goes quiet.

use std::collections::VecDeque;

use intcode_vm::{Machine, MachineConfig, State};
use log::{debug, trace};

use crate::error::NetError;
use crate::scheduler::Scheduler;

/// Value a peer reads when no packet is waiting for it.
pub const NO_PACKET: i64 = -1;

/// One addressed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Packet {
    pub dest: i64,
    pub x: i64,
    pub y: i64,
}

impl Packet {
    pub fn new(dest: i64, x: i64, y: i64) -> Self {
        Self { dest, x, y }
    }
}

/// Network settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Number of peers, addressed `0..size`.
    pub size: usize,
    /// Peer the sink re-delivers its latest packet to when the network is
    /// idle. `None` disables wake-ups.
    pub wake_target: Option<usize>,
    pub machine: MachineConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            size: 50,
            wake_target: Some(0),
            machine: MachineConfig::default(),
        }
    }
}

/// Supervisory node for packets addressed outside the peer set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sink {
    captured: Vec<Packet>,
    wakes: Vec<Packet>,
}

impl Sink {
    /// Most recently captured packet.
    pub fn latest(&self) -> Option<Packet> {
        self.captured.last().copied()
    }

    /// Every captured packet, oldest first.
    pub fn captured(&self) -> &[Packet] {
        &self.captured
    }

    /// Every wake-up delivery, oldest first. The destination is the wake
    /// target.
    pub fn wakes(&self) -> &[Packet] {
        &self.wakes
    }
}

/// What happened during one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tick {
    /// Every live peer polled and read [`NO_PACKET`], no packet was routed,
    /// and no peer has a queued or half-emitted packet.
    pub idle: bool,
    /// Packets the sink captured this round.
    pub captured: Vec<Packet>,
    /// Packet the sink delivered to wake the network, if any.
    pub woke: Option<Packet>,
}

/// A set of peers driven round-robin.
#[derive(Debug, Clone)]
pub struct Network {
    scheduler: Scheduler,
    /// Packets waiting for each peer.
    queues: Vec<VecDeque<Packet>>,
    /// Output values not yet forming a full packet, per peer.
    partial: Vec<Vec<i64>>,
    sink: Sink,
    config: NetworkConfig,
    rounds: u64,
}

impl Network {
    /// Boot `config.size` peers running `program`, each seeded with its
    /// address.
    pub fn new(program: &[i64], config: NetworkConfig) -> Self {
        let mut scheduler = Scheduler::new();
        for id in 0..config.size {
            let machine = Machine::with_config(program.to_vec(), config.machine);
            scheduler.spawn(machine.with_input(&[id as i64]));
        }

        Self {
            scheduler,
            queues: vec![VecDeque::new(); config.size],
            partial: vec![Vec::new(); config.size],
            sink: Sink::default(),
            config,
            rounds: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn machine(&self, id: usize) -> Result<&Machine, NetError> {
        self.scheduler.get(id)
    }

    /// Rounds run so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Queue a packet from outside the network.
    pub fn send(&mut self, packet: Packet) -> Result<(), NetError> {
        let peer = self
            .peer(packet.dest)
            .ok_or(NetError::UnknownPeer(packet.dest))?;
        self.queues[peer].push_back(packet);
        Ok(())
    }

    /// Run every peer for one slice, route the packets they sent, and wake
    /// the network through the sink if the round was idle.
    pub fn step(&mut self) -> Result<Tick, NetError> {
        self.rounds += 1;
        let mut tick = Tick::default();
        let mut moved = 0;
        let mut starved = true;

        for id in 0..self.config.size {
            let state = self.scheduler.run_slice(id)?;
            let machine = self.scheduler.get_mut(id)?;
            match state {
                State::AwaitingInput => match self.queues[id].pop_front() {
                    Some(packet) => {
                        machine.append_input(&[packet.x, packet.y]);
                        moved += 1;
                    }
                    None => machine.append_input(&[NO_PACKET]),
                },
                State::Halted => {}
                _ => starved = false,
            }

            let emitted = machine.take_output();
            self.partial[id].extend(emitted);
            let complete = self.partial[id].len() / 3 * 3;
            let words: Vec<i64> = self.partial[id].drain(..complete).collect();

            for chunk in words.chunks_exact(3) {
                let packet = Packet::new(chunk[0], chunk[1], chunk[2]);
                match self.peer(packet.dest) {
                    Some(peer) => {
                        trace!("{id} -> {peer}: {packet:?}");
                        self.queues[peer].push_back(packet);
                        moved += 1;
                    }
                    None => {
                        debug!("sink captured from {id}: {packet:?}");
                        self.sink.captured.push(packet);
                        tick.captured.push(packet);
                    }
                }
            }
        }

        tick.idle = starved
            && moved == 0
            && self.queues.iter().all(VecDeque::is_empty)
            && self.partial.iter().all(Vec::is_empty);
        if tick.idle {
            tick.woke = self.wake();
        }
        Ok(tick)
    }

    /// Run until the sink captures a packet and return it.
    pub fn run_until_sink(&mut self) -> Result<Packet, NetError> {
        loop {
            let tick = self.step()?;
            if let Some(&packet) = tick.captured.first() {
                return Ok(packet);
            }
            self.ensure_alive()?;
        }
    }

    /// Run until the sink wakes the network with the same `y` twice in a
    /// row, and return that wake-up packet.
    pub fn run_until_repeated_wake(&mut self) -> Result<Packet, NetError> {
        loop {
            let tick = self.step()?;
            if tick.woke.is_some() {
                if let [.., previous, current] = self.sink.wakes.as_slice() {
                    if previous.y == current.y {
                        return Ok(*current);
                    }
                }
            }
            self.ensure_alive()?;
        }
    }

    fn wake(&mut self) -> Option<Packet> {
        let target = self.config.wake_target.filter(|&t| t < self.config.size)?;
        let latest = self.sink.latest()?;
        let packet = Packet::new(target as i64, latest.x, latest.y);
        debug!("network idle, sink wakes peer {target}: {packet:?}");
        self.queues[target].push_back(packet);
        self.sink.wakes.push(packet);
        Some(packet)
    }

    fn ensure_alive(&self) -> Result<(), NetError> {
        if self.scheduler.all_halted() {
            return Err(NetError::AllHalted);
        }
        Ok(())
    }

    /// Map a destination to a peer index, if it names a peer.
    fn peer(&self, dest: i64) -> Option<usize> {
        usize::try_from(dest).ok().filter(|&p| p < self.config.size)
    }
}
