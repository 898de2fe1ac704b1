// SPDX-License-Identifier: MIT
//! Secure boot status (p2976, 46.7.8 SNVS_HP Status Register (SNVS_HPSR), IMX6ULLRM).

use core::fmt;

use crate::driver::snvs::{Snvs, SsmState};

/// Boot security state as reported by the secure storage block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SecurityState {
    /// Secure boot not enforced.
    Open,
    /// HAB closed, SSM in Secure state.
    Secure,
    /// HAB closed, SSM in Trusted state.
    Trusted,
}

impl SecurityState {
    pub const fn from_ssm_state(state: SsmState) -> Self {
        match state {
            SsmState::Trusted => SecurityState::Trusted,
            SsmState::Secure => SecurityState::Secure,
            _ => SecurityState::Open,
        }
    }

    /// Reads the state from the hardware. Never cached.
    pub fn read(snvs: &Snvs) -> Self {
        Self::from_ssm_state(snvs.ssm_state())
    }

    /// Whether secure boot (HAB) is enforced.
    pub const fn is_hab_enabled(self) -> bool {
        matches!(self, SecurityState::Secure | SecurityState::Trusted)
    }
}

impl fmt::Display for SecurityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SecurityState::Open => "open",
            SecurityState::Secure => "secure",
            SecurityState::Trusted => "trusted",
        };

        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_trusted_and_secure_enable_hab() {
        let states = [
            (SsmState::Init, SecurityState::Open),
            (SsmState::HardFail, SecurityState::Open),
            (SsmState::SoftFail, SecurityState::Open),
            (SsmState::InitIntermediate, SecurityState::Open),
            (SsmState::Check, SecurityState::Open),
            (SsmState::NonSecure, SecurityState::Open),
            (SsmState::Undefined(0b0110), SecurityState::Open),
            (SsmState::Trusted, SecurityState::Trusted),
            (SsmState::Secure, SecurityState::Secure),
        ];

        for (ssm, expected) in states {
            let state = SecurityState::from_ssm_state(ssm);
            assert_eq!(state, expected, "{:?}", ssm);
            assert_eq!(state.is_hab_enabled(), expected != SecurityState::Open);
        }
    }
}
