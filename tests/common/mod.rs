use cellarium_lib::model::config::AppConfig;
use cellarium_lib::model::ecosystem::Ecosystem;
use cellarium_lib::model::reproduction::SpawnRequest;
use cellarium_lib::model::traits::{Gender, TraitOverrides};
use cellarium_lib::DVec3;

/// Builds an ecosystem with hand-placed cells for scenario tests. Starts
/// from an empty, seeded world; `build` materializes the queued cells with
/// one quiet tick.
#[allow(dead_code)]
pub struct EcosystemBuilder {
    config: AppConfig,
    seeds: Vec<SpawnRequest>,
}

#[allow(dead_code)]
impl EcosystemBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.initial_population = 0;
        config.world.seed = Some(7);
        Self {
            config,
            seeds: Vec::new(),
        }
    }

    pub fn configure(mut self, f: impl FnOnce(&mut AppConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn cell(mut self, position: DVec3, color: u32, gender: Gender, strength: u32) -> Self {
        self.seeds.push(SpawnRequest {
            parent_id: None,
            position,
            overrides: TraitOverrides {
                color: Some(color),
                gender: Some(gender),
                strength: Some(strength),
                ..Default::default()
            },
        });
        self
    }

    pub fn build(self) -> Ecosystem {
        let mut eco = Ecosystem::new(self.config).expect("builder config must validate");
        let expected = self.seeds.len();
        for seed in self.seeds {
            eco.spawn_cell(seed);
        }
        // Materialize queued cells; detection runs before births, so this
        // tick produces no interactions.
        eco.update(16.0).expect("materialization tick");
        assert_eq!(eco.population(), expected);
        eco
    }
}
