//! CLI tool for deploying and operating the yield vault contracts.

use odra::casper_types::U256;
use odra::host::{Deployer, HostEnv};
use odra::prelude::{Address, Addressable};
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};
use yield_vaults::emission::EmissionAllocator;
use yield_vaults::strategy::holding_strategy::HoldingStrategyInitArgs;
use yield_vaults::strategy::HoldingStrategy;
use yield_vaults::token::AssetToken;
use yield_vaults::vault::reward_vault::{RewardVaultHostRef, RewardVaultInitArgs};
use yield_vaults::vault::RewardVault;

/// Reward units emitted per block across all vaults at deployment
const EMISSION_PER_BLOCK: u64 = 1_000_000_000;
/// Casper block interval, in milliseconds
const BLOCK_INTERVAL_MS: u64 = 16_384;

/// Deploys the reward token.
pub struct RewardTokenDeployScript;

impl DeployScript for RewardTokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use yield_vaults::token::AssetTokenInitArgs;

        let _reward = AssetToken::load_or_deploy(
            &env,
            AssetTokenInitArgs {
                name: String::from("Vault Reward"),
                symbol: String::from("VRWD"),
                decimals: 9,
                transfer_fee_bps: 0,
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the emission allocator.
/// Requires the reward token to be deployed first.
pub struct AllocatorDeployScript;

impl DeployScript for AllocatorDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use yield_vaults::emission::allocator::EmissionAllocatorInitArgs;

        let reward = container.contract_ref::<AssetToken>(env)?;
        let _allocator = EmissionAllocator::load_or_deploy(
            &env,
            EmissionAllocatorInitArgs {
                reward_token: reward.address().clone(),
                emission_per_block: U256::from(EMISSION_PER_BLOCK),
                block_interval: BLOCK_INTERVAL_MS,
            },
            container,
            400_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the reward token and the allocator.
pub struct EmissionDeployScript;

impl DeployScript for EmissionDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        RewardTokenDeployScript.deploy(env, container)?;
        AllocatorDeployScript.deploy(env, container)?;
        Ok(())
    }
}

fn pool_arg() -> CommandArg {
    CommandArg::new("pool", "Address of the vault", NamedCLType::Key)
}

fn weight_arg() -> CommandArg {
    CommandArg::new("weight", "Pool weight, 1 to 10000", NamedCLType::U32)
}

fn vault_ref(env: &HostEnv, args: &Args) -> Result<RewardVaultHostRef, Error> {
    let vault = args.get_single::<Address>("vault")?;
    Ok(<RewardVaultHostRef as odra::host::HostRef>::new(vault, env.clone()))
}

/// Scenario to deploy a vault over an asset, wire a holding strategy and
/// register it with the allocator.
pub struct DeployVaultScenario;

impl Scenario for DeployVaultScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new("asset", "Address of the pooled asset", NamedCLType::Key),
            CommandArg::new(
                "approval_delay",
                "Strategy migration delay in milliseconds",
                NamedCLType::U64,
            ),
            CommandArg::new(
                "exit_fee_bps",
                "Exit fee of the holding strategy",
                NamedCLType::U32,
            ),
            weight_arg(),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let reward = container.contract_ref::<AssetToken>(env)?;
        let mut allocator = container.contract_ref::<EmissionAllocator>(env)?;
        let asset = args.get_single::<Address>("asset")?;
        let approval_delay = args.get_single::<u64>("approval_delay")?;
        let exit_fee_bps = args.get_single::<u32>("exit_fee_bps")?;
        let weight = args.get_single::<u32>("weight")?;

        env.set_gas(500_000_000_000);
        let mut vault = RewardVault::try_deploy(
            env,
            RewardVaultInitArgs {
                asset,
                reward_token: reward.address().clone(),
                allocator: allocator.address().clone(),
                approval_delay,
            },
        )?;
        let vault_address = vault.address().clone();

        env.set_gas(300_000_000_000);
        let strategy = HoldingStrategy::try_deploy(
            env,
            HoldingStrategyInitArgs {
                asset,
                vault: vault_address,
                exit_fee_bps,
            },
        )?;

        env.set_gas(50_000_000_000);
        vault.try_set_strategy(strategy.address().clone())?;
        allocator.try_register(vault_address, weight)?;

        println!("Vault deployed at {:?}", vault_address);
        println!("Strategy deployed at {:?}", strategy.address());
        Ok(())
    }
}

impl ScenarioMetadata for DeployVaultScenario {
    const NAME: &'static str = "deploy-vault";
    const DESCRIPTION: &'static str = "Deploys a vault with a holding strategy and registers it for emission";
}

/// Scenario to deploy a holding strategy for an existing vault.
pub struct DeployStrategyScenario;

impl Scenario for DeployStrategyScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new("vault", "Address of the vault", NamedCLType::Key),
            CommandArg::new("exit_fee_bps", "Exit fee in basis points", NamedCLType::U32),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        _container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let vault = vault_ref(env, &args)?;
        let exit_fee_bps = args.get_single::<u32>("exit_fee_bps")?;

        env.set_gas(300_000_000_000);
        let strategy = HoldingStrategy::try_deploy(
            env,
            HoldingStrategyInitArgs {
                asset: vault.asset(),
                vault: vault.address().clone(),
                exit_fee_bps,
            },
        )?;

        println!("Strategy deployed at {:?}", strategy.address());
        Ok(())
    }
}

impl ScenarioMetadata for DeployStrategyScenario {
    const NAME: &'static str = "deploy-strategy";
    const DESCRIPTION: &'static str = "Deploys a holding strategy bound to an existing vault";
}

/// Scenario to begin emission.
pub struct StartEmissionScenario;

impl Scenario for StartEmissionScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut allocator = container.contract_ref::<EmissionAllocator>(env)?;

        env.set_gas(50_000_000_000);
        allocator.try_start_emission()?;

        println!("Emission started at height {}", allocator.current_height());
        Ok(())
    }
}

impl ScenarioMetadata for StartEmissionScenario {
    const NAME: &'static str = "start-emission";
    const DESCRIPTION: &'static str = "Starts reward emission";
}

/// Scenario to add a vault to the emission registry.
pub struct RegisterPoolScenario;

impl Scenario for RegisterPoolScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![pool_arg(), weight_arg()]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut allocator = container.contract_ref::<EmissionAllocator>(env)?;
        let pool = args.get_single::<Address>("pool")?;
        let weight = args.get_single::<u32>("weight")?;

        env.set_gas(100_000_000_000);
        allocator.try_register(pool, weight)?;

        println!("Pool registered, total weight {}", allocator.total_weight());
        Ok(())
    }
}

impl ScenarioMetadata for RegisterPoolScenario {
    const NAME: &'static str = "register-pool";
    const DESCRIPTION: &'static str = "Registers a vault with the emission allocator";
}

/// Scenario to change a vault's emission weight.
pub struct ReweightPoolScenario;

impl Scenario for ReweightPoolScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![pool_arg(), weight_arg()]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut allocator = container.contract_ref::<EmissionAllocator>(env)?;
        let pool = args.get_single::<Address>("pool")?;
        let weight = args.get_single::<u32>("weight")?;

        env.set_gas(100_000_000_000);
        allocator.try_reweight(pool, weight)?;

        println!("Pool reweighted, total weight {}", allocator.total_weight());
        Ok(())
    }
}

impl ScenarioMetadata for ReweightPoolScenario {
    const NAME: &'static str = "reweight-pool";
    const DESCRIPTION: &'static str = "Changes the emission weight of a registered vault";
}

/// Scenario to remove a vault from the emission registry.
pub struct DeregisterPoolScenario;

impl Scenario for DeregisterPoolScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![pool_arg()]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut allocator = container.contract_ref::<EmissionAllocator>(env)?;
        let pool = args.get_single::<Address>("pool")?;

        env.set_gas(100_000_000_000);
        allocator.try_deregister(pool)?;

        println!("Pool deregistered, {} pools remain", allocator.active_pool_count());
        Ok(())
    }
}

impl ScenarioMetadata for DeregisterPoolScenario {
    const NAME: &'static str = "deregister-pool";
    const DESCRIPTION: &'static str = "Removes a vault from the emission allocator";
}

/// Scenario to propose a replacement strategy for a vault.
pub struct ProposeStrategyScenario;

impl Scenario for ProposeStrategyScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new("vault", "Address of the vault", NamedCLType::Key),
            CommandArg::new("strategy", "Address of the candidate strategy", NamedCLType::Key),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        _container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut vault = vault_ref(env, &args)?;
        let strategy = args.get_single::<Address>("strategy")?;

        env.set_gas(50_000_000_000);
        vault.try_propose_strategy(strategy)?;

        println!("Strategy proposed, delay {} ms", vault.approval_delay());
        Ok(())
    }
}

impl ScenarioMetadata for ProposeStrategyScenario {
    const NAME: &'static str = "propose-strategy";
    const DESCRIPTION: &'static str = "Proposes a new strategy for a vault";
}

/// Scenario to activate a vault's pending strategy.
pub struct UpgradeStrategyScenario;

impl Scenario for UpgradeStrategyScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![CommandArg::new("vault", "Address of the vault", NamedCLType::Key)]
    }

    fn run(
        &self,
        env: &HostEnv,
        _container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut vault = vault_ref(env, &args)?;

        env.set_gas(300_000_000_000);
        vault.try_upgrade_strategy()?;

        println!("Strategy upgraded, pooled value {}", vault.pooled_asset_value());
        Ok(())
    }
}

impl ScenarioMetadata for UpgradeStrategyScenario {
    const NAME: &'static str = "upgrade-strategy";
    const DESCRIPTION: &'static str = "Activates the pending strategy once its delay has elapsed";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the yield vault contracts")
        // Deploy scripts
        .deploy(RewardTokenDeployScript)
        .deploy(AllocatorDeployScript)
        .deploy(EmissionDeployScript)
        // Contract references
        .contract::<AssetToken>()
        .contract::<EmissionAllocator>()
        // Scenarios
        .scenario(DeployVaultScenario)
        .scenario(DeployStrategyScenario)
        .scenario(StartEmissionScenario)
        .scenario(RegisterPoolScenario)
        .scenario(ReweightPoolScenario)
        .scenario(DeregisterPoolScenario)
        .scenario(ProposeStrategyScenario)
        .scenario(UpgradeStrategyScenario)
        .build()
        .run();
}
