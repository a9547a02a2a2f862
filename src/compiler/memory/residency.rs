use std::fmt::{Display, Formatter};

use super::{Address, Reg, RESERVED_REGISTER};

/// The allocation state of one register.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegisterSlot {
    resident: Option<Address>,
    age: u32,
}

impl RegisterSlot {
    pub fn resident(&self) -> Option<Address> {
        self.resident
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    fn clear(&mut self) {
        self.resident = None;
        self.age = 0;
    }
}

/**
 * Tracks which memory address, if any, each register of the target currently
 * caches and how long ago it was filled.  Register 0 is reserved by the
 * hardware: it has a slot so that indices line up with register numbers, but
 * it is never handed out, filled, or invalidated.
 *
 * Ages form a logical clock advanced once per source instruction by `tick`,
 * so registers filled by the same instruction share an age and eviction
 * falls back on register order to break the tie.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct ResidencyTable {
    slots: Vec<RegisterSlot>,
}

impl ResidencyTable {
    /// Creates an empty table for a register file of `registers` registers.
    /// The caller guarantees there is at least one usable register.
    pub fn new(registers: usize) -> ResidencyTable {
        debug_assert!(registers > 1, "register 0 is reserved");
        ResidencyTable {
            slots: vec![RegisterSlot::default(); registers],
        }
    }

    /// Total number of registers including the reserved one.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// The registers which may be allocated.
    pub fn usable(&self) -> std::ops::Range<Reg> {
        RESERVED_REGISTER + 1..self.slots.len()
    }

    pub fn slot(&self, reg: Reg) -> Option<&RegisterSlot> {
        self.slots.get(reg)
    }

    /// Finds the register which caches `addr`.
    pub fn locate(&self, addr: Address) -> Option<Reg> {
        self.usable().find(|&r| self.slots[r].resident == Some(addr))
    }

    /// Picks the register to (re)fill next.  An empty register is preferred,
    /// lowest index first.  Otherwise the register with the greatest age is
    /// evicted, lowest index first among equal ages.  The returned register is
    /// always empty.
    pub fn find_victim(&mut self) -> Reg {
        if let Some(empty) = self.usable().find(|&r| self.slots[r].resident.is_none()) {
            return empty;
        }

        let mut victim = RESERVED_REGISTER + 1;
        for r in self.usable() {
            if self.slots[r].age > self.slots[victim].age {
                victim = r;
            }
        }
        self.invalidate_register(victim);
        victim
    }

    /// Drops every cached copy of `addr`.  Called whenever `addr` is written.
    pub fn invalidate_address(&mut self, addr: Address) {
        for r in self.usable() {
            if self.slots[r].resident == Some(addr) {
                self.slots[r].clear();
            }
        }
    }

    pub fn invalidate_register(&mut self, reg: Reg) {
        if reg != RESERVED_REGISTER {
            self.slots[reg].clear();
        }
    }

    /// Marks `reg` as caching `addr`, with a fresh age.
    pub fn fill(&mut self, reg: Reg, addr: Address) {
        if reg != RESERVED_REGISTER {
            self.slots[reg] = RegisterSlot {
                resident: Some(addr),
                age: 0,
            };
        }
    }

    /// Advances the clock by one source instruction.
    pub fn tick(&mut self) {
        for slot in self.slots.iter_mut().skip(RESERVED_REGISTER + 1) {
            if slot.resident.is_some() {
                slot.age = slot.age.saturating_add(1);
            }
        }
    }
}

impl Display for ResidencyTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<String> = self
            .usable()
            .map(|r| match self.slots[r].resident {
                Some(addr) => addr.to_string(),
                None => "-".into(),
            })
            .collect();
        write!(f, "[{}]", cells.join(","))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn locate_empty_table() {
        let table = ResidencyTable::new(8);
        assert_eq!(table.locate(0), None);
        assert_eq!(table.locate(42), None);
    }

    #[test]
    fn fill_then_locate() {
        let mut table = ResidencyTable::new(8);
        table.fill(3, 10);
        assert_eq!(table.locate(10), Some(3));
        assert_eq!(table.slot(3).unwrap().age(), 0);
    }

    #[test]
    fn victims_fill_empty_registers_in_order() {
        let mut table = ResidencyTable::new(4);
        for (expected, addr) in [(1, 100), (2, 101), (3, 102)].iter() {
            let r = table.find_victim();
            assert_eq!(r, *expected);
            table.fill(r, *addr);
        }
    }

    #[test]
    fn victim_is_oldest_register() {
        let mut table = ResidencyTable::new(4);
        table.fill(1, 10);
        table.tick();
        table.fill(2, 11);
        table.tick();
        table.fill(3, 12);
        table.tick();

        // ages are now 3, 2, 1
        assert_eq!(table.find_victim(), 1);
        assert_eq!(table.locate(10), None);
        assert_eq!(table.slot(1).unwrap().age(), 0);
    }

    #[test]
    fn victim_tie_breaks_on_lowest_index() {
        let mut table = ResidencyTable::new(4);
        table.fill(3, 12);
        table.fill(2, 11);
        table.fill(1, 10);
        table.tick();
        assert_eq!(table.find_victim(), 1);
        table.fill(1, 20);
        assert_eq!(table.find_victim(), 2);
    }

    #[test]
    fn refilling_resets_age() {
        let mut table = ResidencyTable::new(3);
        table.fill(1, 10);
        table.fill(2, 11);
        table.tick();
        table.tick();
        table.fill(1, 10);
        table.tick();
        assert_eq!(table.find_victim(), 2);
    }

    #[test]
    fn age_saturates() {
        let mut table = ResidencyTable::new(3);
        table.fill(1, 10);
        table.fill(2, 11);
        table.slots[1].age = u32::MAX;
        table.tick();
        assert_eq!(table.slot(1).unwrap().age(), u32::MAX);
        assert_eq!(table.slot(2).unwrap().age(), 1);
        assert_eq!(table.find_victim(), 1);
    }

    #[test]
    fn invalidate_address_clears_slot() {
        let mut table = ResidencyTable::new(8);
        table.fill(4, 7);
        table.tick();
        table.invalidate_address(7);
        assert_eq!(table.locate(7), None);
        assert_eq!(*table.slot(4).unwrap(), RegisterSlot::default());
    }

    #[test]
    fn reserved_register_is_never_touched() {
        let mut table = ResidencyTable::new(2);
        table.fill(0, 5);
        assert_eq!(table.locate(5), None);
        assert_eq!(table.find_victim(), 1);
        table.fill(1, 5);
        table.tick();
        assert_eq!(table.find_victim(), 1);
        assert_eq!(*table.slot(0).unwrap(), RegisterSlot::default());
    }

    #[test]
    fn display_lists_usable_registers() {
        let mut table = ResidencyTable::new(4);
        table.fill(2, 9);
        assert_eq!(table.to_string(), "[-,9,-]");
    }

    #[test]
    fn random_operations_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for registers in 2..10 {
            let mut table = ResidencyTable::new(registers);
            for _ in 0..500 {
                let addr = rng.gen_range(0..12);
                match rng.gen_range(0..5) {
                    0 => {
                        if table.locate(addr).is_none() {
                            let r = table.find_victim();
                            assert!(r >= 1 && r < registers);
                            table.fill(r, addr);
                        }
                    }
                    1 => {
                        let r = table.find_victim();
                        assert!(r >= 1 && r < registers);
                        table.invalidate_address(addr);
                        table.fill(r, addr);
                    }
                    2 => table.invalidate_address(addr),
                    3 => table.invalidate_register(rng.gen_range(0..registers)),
                    _ => table.tick(),
                }

                let mut seen = HashSet::new();
                for r in table.usable() {
                    if let Some(a) = table.slot(r).unwrap().resident() {
                        assert!(seen.insert(a), "{} cached twice in {}", a, table);
                    }
                }
                assert_eq!(*table.slot(0).unwrap(), RegisterSlot::default());
            }
        }
    }
}
