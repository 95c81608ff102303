use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::error::ReflectionError;
use crate::math::FeeRates;
use crate::state::ReflectionConfig;

// ============================================================================
// Initialize Engine
// ============================================================================

#[derive(Accounts)]
pub struct InitializeEngine<'info> {
    /// Token the engine accounts for
    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = ReflectionConfig::SIZE,
        seeds = [ReflectionConfig::SEED, mint.key().as_ref()],
        bump
    )]
    pub config: Account<'info, ReflectionConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_engine_handler(ctx: Context<InitializeEngine>) -> Result<()> {
    let token = ctx.accounts.mint.key();
    let config = &mut ctx.accounts.config;
    config.set_inner(ReflectionConfig {
        authority: ctx.accounts.authority.key(),
        token,
        bump: ctx.bumps.config,
        ..Default::default()
    });

    emit!(EngineInitialized {
        config: config.key(),
        token,
        authority: config.authority,
    });

    msg!(
        "Reflection engine initialized for token {} ({} decimals)",
        token,
        ctx.accounts.mint.decimals
    );
    Ok(())
}

// ============================================================================
// Fee Configuration
// ============================================================================

#[derive(Accounts)]
pub struct ConfigureFees<'info> {
    #[account(
        mut,
        seeds = [ReflectionConfig::SEED, config.token.as_ref()],
        bump = config.bump,
        has_one = authority @ ReflectionError::Unauthorized
    )]
    pub config: Account<'info, ReflectionConfig>,

    pub authority: Signer<'info>,
}

pub fn initialize_fees_handler(
    ctx: Context<ConfigureFees>,
    rates: FeeRates,
    creator: Pubkey,
    liquidity_pool: Pubkey,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.initialize_fees(rates, creator, liquidity_pool)?;

    emit_fee_events(config);
    msg!("Fees initialized: {} bps total", config.total_fee_bps);
    Ok(())
}

pub fn update_fees_handler(
    ctx: Context<ConfigureFees>,
    rates: FeeRates,
    creator: Pubkey,
    liquidity_pool: Pubkey,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.update_fees(rates, creator, liquidity_pool)?;

    emit_fee_events(config);
    msg!("Fees updated: {} bps total", config.total_fee_bps);
    Ok(())
}

fn emit_fee_events(config: &Account<ReflectionConfig>) {
    emit!(FeesConfigured {
        config: config.key(),
        creator_bps: config.creator_bps,
        reflection_bps: config.reflection_bps,
        liquidity_bps: config.liquidity_bps,
        burn_bps: config.burn_bps,
        total_fee_bps: config.total_fee_bps,
    });

    emit!(FeeRecipientsConfigured {
        config: config.key(),
        creator: config.creator,
        liquidity_pool: config.liquidity_pool,
    });
}

#[event]
pub struct EngineInitialized {
    pub config: Pubkey,
    pub token: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct FeesConfigured {
    pub config: Pubkey,
    pub creator_bps: u16,
    pub reflection_bps: u16,
    pub liquidity_bps: u16,
    pub burn_bps: u16,
    pub total_fee_bps: u16,
}

#[event]
pub struct FeeRecipientsConfigured {
    pub config: Pubkey,
    pub creator: Pubkey,
    pub liquidity_pool: Pubkey,
}
