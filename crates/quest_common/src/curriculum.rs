//! Curriculum dataset for the RLHF learning game.
//!
//! Five levels, unlocked one after another. Declaration order is the unlock
//! chain: a level opens once the level before it is completed.

use crate::error::{QuestError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// External learning resource attached to a level
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Resource {
    pub label: &'static str,
    pub url: &'static str,
}

/// One curriculum unit
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Level {
    /// Unique identifier, also the persisted form of completion
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Suggested hands-on exercise
    pub example: &'static str,
    /// Experience points awarded on completion
    pub xp: u32,
    pub resources: &'static [Resource],
}

/// Built-in levels, in unlock order
pub static LEVELS: &[Level] = &[
    Level {
        key: "lvl1",
        title: "Foundations of Reinforcement",
        description: "Learn what an RL agent is, how rewards, states, and actions work, and how to represent them in code.",
        example: "Use Python + OpenAI Gym to train a CartPole agent using random actions.",
        xp: 100,
        resources: &[
            Resource {
                label: "Sutton & Barto Book (Ch.1–3)",
                url: "http://incompleteideas.net/book/the-book-2nd.html",
            },
            Resource {
                label: "OpenAI Gym - CartPole",
                url: "https://www.gymlibrary.dev/environments/classic_control/cart_pole/",
            },
        ],
    },
    Level {
        key: "lvl2",
        title: "Deep RL: DQNs",
        description: "Use deep learning (neural nets) to estimate value functions and make better decisions.",
        example: "Train a DQN agent to solve CartPole using PyTorch and experience replay.",
        xp: 150,
        resources: &[
            Resource {
                label: "DQN in PyTorch (Official Tutorial)",
                url: "https://pytorch.org/tutorials/intermediate/reinforcement_q_learning.html",
            },
            Resource {
                label: "DQN YouTube Walkthrough",
                url: "https://www.youtube.com/watch?v=wc-FxNENg9U",
            },
        ],
    },
    Level {
        key: "lvl3",
        title: "Policy Gradients",
        description: "Instead of learning values, directly optimize the probability of actions using gradients.",
        example: "Implement REINFORCE to solve MountainCarContinuous-v0 in Gym.",
        xp: 200,
        resources: &[
            Resource {
                label: "Spinning Up: Policy Gradient",
                url: "https://spinningup.openai.com/en/latest/algorithms/vpg.html",
            },
            Resource {
                label: "Sutton Book (Ch.13)",
                url: "http://incompleteideas.net/book/the-book-2nd.html",
            },
        ],
    },
    Level {
        key: "lvl4",
        title: "PPO (Proximal Policy Optimization)",
        description: "Learn how to stabilize policy updates using a clipped objective — a modern, high-performance RL algorithm.",
        example: "Train a PPO agent using Spinning Up to beat LunarLanderContinuous-v2.",
        xp: 250,
        resources: &[
            Resource {
                label: "Spinning Up: PPO",
                url: "https://spinningup.openai.com/en/latest/algorithms/ppo.html",
            },
            Resource {
                label: "PPO From Scratch (Blog)",
                url: "https://iclr-blog-track.github.io/2022/03/25/ppo-implementation-details/",
            },
        ],
    },
    Level {
        key: "lvl5",
        title: "RLHF (Reinforcement Learning from Human Feedback)",
        description: "Learn how large language models are fine-tuned with human feedback using PPO and reward models.",
        example: "Fine-tune a GPT-2 model using Hugging Face TRL with a reward model to prefer shorter summaries.",
        xp: 300,
        resources: &[
            Resource {
                label: "OpenAI RLHF Blog",
                url: "https://openai.com/blog/rlhf",
            },
            Resource {
                label: "RLHF Paper (ArXiv)",
                url: "https://arxiv.org/abs/1909.08593",
            },
            Resource {
                label: "Hugging Face TRL Library",
                url: "https://github.com/huggingface/trl",
            },
        ],
    },
];

/// Ordered, immutable list of levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curriculum {
    levels: Vec<Level>,
}

impl Curriculum {
    /// The compiled-in five-level curriculum
    pub fn builtin() -> Self {
        Self { levels: LEVELS.to_vec() }
    }

    /// Build a curriculum from an arbitrary level list.
    ///
    /// Rejects empty lists, empty or duplicate keys, zero xp and xp totals
    /// that do not fit in a `u32`.
    pub fn new(levels: Vec<Level>) -> Result<Self> {
        if levels.is_empty() {
            return Err(QuestError::Curriculum("curriculum has no levels".to_string()));
        }

        let mut seen = HashSet::new();
        let mut total: u32 = 0;
        for level in &levels {
            if level.key.is_empty() {
                return Err(QuestError::Curriculum(format!(
                    "level '{}' has an empty key",
                    level.title
                )));
            }
            if !seen.insert(level.key) {
                return Err(QuestError::Curriculum(format!("duplicate level key '{}'", level.key)));
            }
            if level.xp == 0 {
                return Err(QuestError::Curriculum(format!(
                    "level '{}' awards no xp",
                    level.key
                )));
            }
            total = total.checked_add(level.xp).ok_or_else(|| {
                QuestError::Curriculum(format!("total xp overflows at level '{}'", level.key))
            })?;
        }

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Position of a level in the unlock chain
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.key == key)
    }

    pub fn find(&self, key: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Sum of xp over every level
    pub fn total_xp(&self) -> u32 {
        self.levels.iter().map(|l| l.xp).sum()
    }
}

impl Default for Curriculum {
    fn default() -> Self {
        Self::builtin()
    }
}
