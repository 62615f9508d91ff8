// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

/// One Wishbone bus cycle: the request driven into the divider and, once
/// known, the response it produced.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Transaction {
    /// Packed operands. See [`crate::operands`].
    pub data_in: u64,
    /// Operation tag. See [`crate::Operation`].
    pub data_tag: u8,
    pub cycle: bool,
    pub strobe: bool,
    pub data_out: Option<i64>,
    pub acknowledge: bool,
}

impl Transaction {
    /// A request with both `CYC` and `STB` asserted.
    pub fn request(data_in: u64, data_tag: u8) -> Self {
        Self {
            data_in,
            data_tag,
            cycle: true,
            strobe: true,
            data_out: None,
            acknowledge: false,
        }
    }

    /// A bus cycle with `CYC` and `STB` deasserted, which the divider must
    /// ignore.
    pub fn idle(data_in: u64) -> Self {
        Self {
            cycle: false,
            strobe: false,
            ..Self::request(data_in, 0)
        }
    }

    /// Whether the divider is expected to act on this cycle.
    pub fn is_active(&self) -> bool {
        self.cycle && self.strobe
    }

    /// Annotates the transaction with the response `data_out`, acknowledged
    /// on an active cycle.
    pub fn respond(self, data_out: i64) -> Self {
        Self {
            data_out: Some(data_out),
            cycle: true,
            strobe: true,
            acknowledge: true,
            ..self
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data_in={:#x} tag={} cyc={} stb={}",
            self.data_in, self.data_tag, self.cycle as u8, self.strobe as u8
        )?;
        if let Some(data_out) = self.data_out {
            write!(f, " data_out={} ack={}", data_out, self.acknowledge as u8)?;
        }
        Ok(())
    }
}
