//! Consumed SDK surface
//!
//! One trait per SDK domain group, mirroring the wrapped facade. Queries that
//! have a proof-carrying variant take a `proof` flag; the response arrives as
//! [`SdkResponse::Proved`] when it was requested and the SDK honored it.
//! Mutations take typed payloads plus the resolved [`SigningContext`].
//!
//! Every method has a default body failing with [`SdkError::Unsupported`], so
//! a connector implements exactly the groups its SDK build provides and test
//! doubles override only what they exercise.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde_json::Value;

use super::options::ConnectOptions;
use super::signing::{IdentityHandle, Signer, SigningContext};
use super::{SdkError, SdkResult};

// ---------------------------------------------------------------------------
// Query payloads
// ---------------------------------------------------------------------------

/// Identity key listing request.
#[derive(Debug, Clone, Default)]
pub struct KeyRequest {
    pub identity_id: String,
    pub request_type: Option<String>,
    pub specific_key_ids: Vec<u32>,
    pub search_purpose_map: Option<Value>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct ContractHistoryQuery {
    pub contract_id: String,
    pub limit: Option<u32>,
    pub start_at_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    pub contract_id: String,
    pub document_type: String,
    pub where_clause: Option<Value>,
    pub order_by: Option<Value>,
    pub limit: Option<u32>,
    pub start_after: Option<String>,
    pub start_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EpochRange {
    pub start_epoch: Option<u32>,
    pub count: Option<u32>,
    pub ascending: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ProposedBlocksRange {
    pub epoch: Option<u32>,
    pub limit: Option<u32>,
    pub start_after: Option<String>,
    pub order_ascending: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupMembersQuery {
    pub contract_id: String,
    pub position: u32,
    pub member_ids: Option<Vec<String>>,
    pub start_at: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupActionsQuery {
    pub contract_id: String,
    pub position: u32,
    pub status: String,
    pub start_at_info: Option<Value>,
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupMembershipFilter {
    pub member_data_contracts: Option<Vec<String>>,
    pub owner_data_contracts: Option<Vec<String>>,
    pub moderator_data_contracts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct ContestedResourcesQuery {
    pub contract_id: String,
    pub document_type_name: String,
    pub index_name: String,
    pub start_at_value: Option<Value>,
    pub limit: Option<u32>,
    pub order_ascending: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ContestedVotersQuery {
    pub contract_id: String,
    pub document_type_name: String,
    pub index_name: String,
    pub index_values: Vec<String>,
    pub contestant_id: String,
    pub start_at: Option<Value>,
    pub limit: Option<u32>,
    pub order_ascending: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct VoteStateQuery {
    pub contract_id: String,
    pub document_type_name: String,
    pub index_name: String,
    pub index_values: Vec<String>,
    pub result_type: Option<String>,
    pub allow_include_locked_and_abstaining_vote_tally: Option<bool>,
    pub start_at_identifier_info: Option<Value>,
    pub count: Option<u32>,
    pub order_ascending: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct IdentityVotesQuery {
    pub identity_id: String,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub start_at_vote_poll_id_info: Option<Value>,
    pub order_ascending: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VotePollsQuery {
    pub start_time_ms: Option<u64>,
    pub end_time_ms: Option<u64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub order_ascending: Option<bool>,
}

// ---------------------------------------------------------------------------
// Mutation payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct IdentityCreateParams {
    pub asset_lock_proof: String,
    pub asset_lock_private_key_wif: String,
    pub public_keys: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct IdentityTopUpParams {
    pub identity_id: String,
    pub asset_lock_proof: String,
    pub asset_lock_private_key_wif: String,
}

#[derive(Debug, Clone)]
pub struct CreditTransferParams {
    pub sender_id: String,
    pub recipient_id: String,
    pub amount: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct CreditWithdrawalParams {
    pub identity_id: String,
    pub to_address: Option<String>,
    pub amount: BigDecimal,
    pub core_fee_per_byte: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct IdentityUpdateParams {
    pub identity_id: String,
    pub add_public_keys: Option<Value>,
    pub disable_public_key_ids: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct ContractCreateParams {
    pub owner_id: String,
    /// Full contract definition document, serialized.
    pub definition: String,
}

#[derive(Debug, Clone)]
pub struct ContractUpdateParams {
    pub contract_id: String,
    pub owner_id: String,
    pub updates: Value,
}

#[derive(Debug, Clone)]
pub struct DocumentCreateParams {
    pub contract_id: String,
    pub document_type: String,
    pub owner_id: String,
    pub data: Value,
    pub entropy_hex: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DocumentReplaceParams {
    pub contract_id: String,
    pub document_type: String,
    pub document_id: String,
    pub owner_id: String,
    pub data: Value,
    pub revision: u64,
}

#[derive(Debug, Clone)]
pub struct DocumentDeleteParams {
    pub contract_id: String,
    pub document_type: String,
    pub document_id: String,
    pub owner_id: String,
}

#[derive(Debug, Clone)]
pub struct DocumentTransferParams {
    pub contract_id: String,
    pub document_type: String,
    pub document_id: String,
    pub owner_id: String,
    pub recipient_id: String,
}

#[derive(Debug, Clone)]
pub struct DocumentPurchaseParams {
    pub contract_id: String,
    pub document_type: String,
    pub document_id: String,
    pub buyer_id: String,
    pub price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct DocumentSetPriceParams {
    pub contract_id: String,
    pub document_type: String,
    pub document_id: String,
    pub owner_id: String,
    pub price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct TokenMintParams {
    pub contract_id: String,
    pub token_position: u32,
    pub amount: BigDecimal,
    pub identity_id: String,
    pub recipient_id: Option<String>,
    pub public_note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenBurnParams {
    pub contract_id: String,
    pub token_position: u32,
    pub amount: BigDecimal,
    pub identity_id: String,
    pub public_note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenTransferParams {
    pub contract_id: String,
    pub token_position: u32,
    pub amount: BigDecimal,
    pub sender_id: String,
    pub recipient_id: String,
    pub public_note: Option<String>,
}

/// Shared shape for freeze, unfreeze, and destroy-frozen.
#[derive(Debug, Clone)]
pub struct TokenFreezeParams {
    pub contract_id: String,
    pub token_position: u32,
    /// Identity performing the action (freezer/unfreezer/destroyer).
    pub actor_id: String,
    /// Identity whose tokens are affected.
    pub frozen_identity_id: String,
    pub public_note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenPriceScheduleParams {
    pub contract_id: String,
    pub token_position: u32,
    pub identity_id: String,
    pub price_type: String,
    pub price_data: Option<Value>,
    pub public_note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenDirectPurchaseParams {
    pub contract_id: String,
    pub token_position: u32,
    pub identity_id: String,
    pub amount: BigDecimal,
    pub total_agreed_price: Option<BigDecimal>,
}

#[derive(Debug, Clone)]
pub struct TokenClaimParams {
    pub contract_id: String,
    pub token_position: u32,
    pub identity_id: String,
    pub distribution_type: Option<String>,
    pub public_note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenConfigUpdateParams {
    pub contract_id: String,
    pub token_position: u32,
    pub identity_id: String,
    pub config_item_type: String,
    pub config_value: Option<Value>,
    pub public_note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MasternodeVoteParams {
    pub pro_tx_hash: String,
    pub contract_id: String,
    pub document_type_name: String,
    pub index_name: String,
    pub index_values: Vec<String>,
    pub vote_choice: String,
}

// ---------------------------------------------------------------------------
// Domain traits
// ---------------------------------------------------------------------------

#[allow(unused_variables)]
#[async_trait(?Send)]
pub trait IdentitiesApi {
    async fn fetch(&self, id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("identities.fetch"))
    }
    async fn fetch_unproved(&self, id: &str) -> SdkResult {
        Err(SdkError::Unsupported("identities.fetchUnproved"))
    }
    async fn keys(&self, request: KeyRequest, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("identities.keys"))
    }
    async fn contract_keys(
        &self,
        identity_ids: &[String],
        contract_id: &str,
        purposes: &[u32],
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("identities.contractKeys"))
    }
    async fn nonce(&self, identity_id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("identities.nonce"))
    }
    async fn contract_nonce(&self, identity_id: &str, contract_id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("identities.contractNonce"))
    }
    async fn balance(&self, identity_id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("identities.balance"))
    }
    async fn balances(&self, identity_ids: &[String], proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("identities.balances"))
    }
    async fn balance_and_revision(&self, identity_id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("identities.balanceAndRevision"))
    }
    async fn by_public_key_hash(&self, hash: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("identities.byPublicKeyHash"))
    }
    async fn by_non_unique_public_key_hash(
        &self,
        hash: &str,
        start_after: Option<&str>,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("identities.byNonUniquePublicKeyHash"))
    }
    async fn token_balances(&self, identity_id: &str, token_ids: &[String], proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("identities.tokenBalances"))
    }

    /// Fetch current identity state ahead of a mutation. `None` means the
    /// identity does not exist.
    async fn resolve(&self, id: &str) -> Result<Option<IdentityHandle>, SdkError> {
        Err(SdkError::Unsupported("identities.resolve"))
    }

    async fn create(&self, params: IdentityCreateParams) -> SdkResult {
        Err(SdkError::Unsupported("identities.create"))
    }
    async fn top_up(&self, params: IdentityTopUpParams) -> SdkResult {
        Err(SdkError::Unsupported("identities.topUp"))
    }
    async fn credit_transfer(&self, params: CreditTransferParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("identities.creditTransfer"))
    }
    async fn credit_withdrawal(
        &self,
        params: CreditWithdrawalParams,
        ctx: &SigningContext,
    ) -> SdkResult {
        Err(SdkError::Unsupported("identities.creditWithdrawal"))
    }
    async fn update(&self, params: IdentityUpdateParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("identities.update"))
    }
}

#[allow(unused_variables)]
#[async_trait(?Send)]
pub trait ContractsApi {
    async fn fetch(&self, id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("contracts.fetch"))
    }
    async fn history(&self, query: ContractHistoryQuery, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("contracts.history"))
    }
    async fn fetch_many(&self, ids: &[String], proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("contracts.fetchMany"))
    }
    async fn create(&self, params: ContractCreateParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("contracts.create"))
    }
    async fn update(&self, params: ContractUpdateParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("contracts.update"))
    }
}

#[allow(unused_variables)]
#[async_trait(?Send)]
pub trait DocumentsApi {
    async fn query(&self, query: DocumentQuery, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("documents.query"))
    }
    async fn get(
        &self,
        contract_id: &str,
        document_type: &str,
        document_id: &str,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("documents.get"))
    }
    async fn create(&self, params: DocumentCreateParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("documents.create"))
    }
    async fn replace(&self, params: DocumentReplaceParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("documents.replace"))
    }
    async fn delete(&self, params: DocumentDeleteParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("documents.delete"))
    }
    async fn transfer(&self, params: DocumentTransferParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("documents.transfer"))
    }
    async fn purchase(&self, params: DocumentPurchaseParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("documents.purchase"))
    }
    async fn set_price(&self, params: DocumentSetPriceParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("documents.setPrice"))
    }
}

#[allow(unused_variables)]
#[async_trait(?Send)]
pub trait TokensApi {
    async fn statuses(&self, token_ids: &[String], proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("tokens.statuses"))
    }
    async fn direct_purchase_prices(&self, token_ids: &[String], proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("tokens.directPurchasePrices"))
    }
    async fn contract_info(&self, contract_id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("tokens.contractInfo"))
    }
    async fn perpetual_distribution_last_claim(
        &self,
        identity_id: &str,
        token_id: &str,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("tokens.perpetualDistributionLastClaim"))
    }
    async fn total_supply(&self, token_id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("tokens.totalSupply"))
    }
    async fn price_by_contract(&self, contract_id: &str, token_position: u32) -> SdkResult {
        Err(SdkError::Unsupported("tokens.priceByContract"))
    }
    /// Balances of one token across several identities.
    async fn balances(&self, identity_ids: &[String], token_id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("tokens.balances"))
    }
    async fn identity_token_infos(
        &self,
        identity_id: &str,
        token_ids: &[String],
        limit: Option<u32>,
        offset: Option<u32>,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("tokens.identityTokenInfos"))
    }
    async fn identities_token_infos(
        &self,
        identity_ids: &[String],
        token_id: &str,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("tokens.identitiesTokenInfos"))
    }

    async fn mint(&self, params: TokenMintParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("tokens.mint"))
    }
    async fn burn(&self, params: TokenBurnParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("tokens.burn"))
    }
    async fn transfer(&self, params: TokenTransferParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("tokens.transfer"))
    }
    async fn freeze(&self, params: TokenFreezeParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("tokens.freeze"))
    }
    async fn unfreeze(&self, params: TokenFreezeParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("tokens.unfreeze"))
    }
    async fn destroy_frozen(&self, params: TokenFreezeParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("tokens.destroyFrozen"))
    }
    async fn set_price_for_direct_purchase(
        &self,
        params: TokenPriceScheduleParams,
        ctx: &SigningContext,
    ) -> SdkResult {
        Err(SdkError::Unsupported("tokens.setPriceForDirectPurchase"))
    }
    async fn direct_purchase(
        &self,
        params: TokenDirectPurchaseParams,
        ctx: &SigningContext,
    ) -> SdkResult {
        Err(SdkError::Unsupported("tokens.directPurchase"))
    }
    async fn claim(&self, params: TokenClaimParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("tokens.claim"))
    }
    async fn config_update(&self, params: TokenConfigUpdateParams, ctx: &SigningContext) -> SdkResult {
        Err(SdkError::Unsupported("tokens.configUpdate"))
    }
}

#[allow(unused_variables)]
#[async_trait(?Send)]
pub trait DpnsApi {
    async fn username(&self, identity_id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("dpns.username"))
    }
    async fn usernames(&self, identity_id: &str, limit: Option<u32>, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("dpns.usernames"))
    }
    async fn username_by_name(&self, username: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("dpns.usernameByName"))
    }
    async fn resolve_name(&self, name: &str) -> SdkResult {
        Err(SdkError::Unsupported("dpns.resolveName"))
    }
    async fn is_name_available(&self, label: &str) -> SdkResult {
        Err(SdkError::Unsupported("dpns.isNameAvailable"))
    }
    async fn convert_to_homograph_safe(&self, name: &str) -> SdkResult {
        Err(SdkError::Unsupported("dpns.convertToHomographSafe"))
    }
    async fn is_valid_username(&self, label: &str) -> SdkResult {
        Err(SdkError::Unsupported("dpns.isValidUsername"))
    }
    async fn is_contested_username(&self, label: &str) -> SdkResult {
        Err(SdkError::Unsupported("dpns.isContestedUsername"))
    }
}

#[allow(unused_variables)]
#[async_trait(?Send)]
pub trait EpochApi {
    async fn epochs_info(&self, range: EpochRange, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("epoch.epochsInfo"))
    }
    async fn current(&self, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("epoch.current"))
    }
    async fn finalized_infos(&self, range: EpochRange, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("epoch.finalizedInfos"))
    }
    async fn evonodes_proposed_blocks_by_ids(
        &self,
        epoch: Option<u32>,
        ids: &[String],
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("epoch.evonodesProposedBlocksByIds"))
    }
    async fn evonodes_proposed_blocks_by_range(
        &self,
        range: ProposedBlocksRange,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("epoch.evonodesProposedBlocksByRange"))
    }
}

#[allow(unused_variables)]
#[async_trait(?Send)]
pub trait ProtocolApi {
    async fn version_upgrade_state(&self, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("protocol.versionUpgradeState"))
    }
    async fn version_upgrade_vote_status(
        &self,
        start_pro_tx_hash: Option<&str>,
        count: Option<u32>,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("protocol.versionUpgradeVoteStatus"))
    }
}

#[allow(unused_variables)]
#[async_trait(?Send)]
pub trait SystemApi {
    async fn status(&self) -> SdkResult {
        Err(SdkError::Unsupported("system.status"))
    }
    async fn current_quorums_info(&self) -> SdkResult {
        Err(SdkError::Unsupported("system.currentQuorumsInfo"))
    }
    async fn total_credits_in_platform(&self, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("system.totalCreditsInPlatform"))
    }
    async fn prefunded_specialized_balance(&self, identity_id: &str, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("system.prefundedSpecializedBalance"))
    }
    async fn path_elements(&self, path: &[String], keys: &[String], proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("system.pathElements"))
    }
    async fn wait_for_state_transition_result(&self, hash: &str) -> SdkResult {
        Err(SdkError::Unsupported("system.waitForStateTransitionResult"))
    }
}

#[allow(unused_variables)]
#[async_trait(?Send)]
pub trait GroupApi {
    async fn info(&self, contract_id: &str, position: u32, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("group.info"))
    }
    async fn infos(
        &self,
        contract_id: &str,
        start_at_info: Option<Value>,
        count: Option<u32>,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("group.infos"))
    }
    async fn members(&self, query: GroupMembersQuery, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("group.members"))
    }
    async fn actions(&self, query: GroupActionsQuery, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("group.actions"))
    }
    async fn action_signers(
        &self,
        contract_id: &str,
        position: u32,
        status: &str,
        action_id: &str,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("group.actionSigners"))
    }
    async fn identity_groups(
        &self,
        identity_id: &str,
        filter: GroupMembershipFilter,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("group.identityGroups"))
    }
    async fn groups_data_contracts(&self, contract_ids: &[String], proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("group.groupsDataContracts"))
    }
}

#[allow(unused_variables)]
#[async_trait(?Send)]
pub trait VotingApi {
    async fn contested_resources(&self, query: ContestedResourcesQuery, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("voting.contestedResources"))
    }
    async fn contested_resource_voters_for_identity(
        &self,
        query: ContestedVotersQuery,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("voting.contestedResourceVotersForIdentity"))
    }
    async fn contested_resource_vote_state(&self, query: VoteStateQuery, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("voting.contestedResourceVoteState"))
    }
    async fn contested_resource_identity_votes(
        &self,
        query: IdentityVotesQuery,
        proof: bool,
    ) -> SdkResult {
        Err(SdkError::Unsupported("voting.contestedResourceIdentityVotes"))
    }
    async fn vote_polls_by_end_date(&self, query: VotePollsQuery, proof: bool) -> SdkResult {
        Err(SdkError::Unsupported("voting.votePollsByEndDate"))
    }
    async fn masternode_vote(&self, params: MasternodeVoteParams, signer: &Signer) -> SdkResult {
        Err(SdkError::Unsupported("voting.masternodeVote"))
    }
}

// Fallback domain implementations: every method reports Unsupported. A
// connected client overrides the accessors for the groups its SDK build
// actually provides.
pub struct NullIdentities;
impl IdentitiesApi for NullIdentities {}
pub struct NullContracts;
impl ContractsApi for NullContracts {}
pub struct NullDocuments;
impl DocumentsApi for NullDocuments {}
pub struct NullTokens;
impl TokensApi for NullTokens {}
pub struct NullDpns;
impl DpnsApi for NullDpns {}
pub struct NullEpoch;
impl EpochApi for NullEpoch {}
pub struct NullProtocol;
impl ProtocolApi for NullProtocol {}
pub struct NullSystem;
impl SystemApi for NullSystem {}
pub struct NullGroup;
impl GroupApi for NullGroup {}
pub struct NullVoting;
impl VotingApi for NullVoting {}

static NULL_IDENTITIES: NullIdentities = NullIdentities;
static NULL_CONTRACTS: NullContracts = NullContracts;
static NULL_DOCUMENTS: NullDocuments = NullDocuments;
static NULL_TOKENS: NullTokens = NullTokens;
static NULL_DPNS: NullDpns = NullDpns;
static NULL_EPOCH: NullEpoch = NullEpoch;
static NULL_PROTOCOL: NullProtocol = NullProtocol;
static NULL_SYSTEM: NullSystem = NullSystem;
static NULL_GROUP: NullGroup = NullGroup;
static NULL_VOTING: NullVoting = NullVoting;

/// A connected SDK client: the domain groups plus the connection lifecycle.
#[async_trait(?Send)]
pub trait PlatformSdk {
    fn identities(&self) -> &dyn IdentitiesApi {
        &NULL_IDENTITIES
    }
    fn contracts(&self) -> &dyn ContractsApi {
        &NULL_CONTRACTS
    }
    fn documents(&self) -> &dyn DocumentsApi {
        &NULL_DOCUMENTS
    }
    fn tokens(&self) -> &dyn TokensApi {
        &NULL_TOKENS
    }
    fn dpns(&self) -> &dyn DpnsApi {
        &NULL_DPNS
    }
    fn epoch(&self) -> &dyn EpochApi {
        &NULL_EPOCH
    }
    fn protocol(&self) -> &dyn ProtocolApi {
        &NULL_PROTOCOL
    }
    fn system(&self) -> &dyn SystemApi {
        &NULL_SYSTEM
    }
    fn group(&self) -> &dyn GroupApi {
        &NULL_GROUP
    }
    fn voting(&self) -> &dyn VotingApi {
        &NULL_VOTING
    }

    fn is_connected(&self) -> bool {
        true
    }
    async fn disconnect(&self) -> Result<(), SdkError> {
        Ok(())
    }
}

/// Factory for connected clients. The session memoizes the result keyed by a
/// hash of the connect options.
#[async_trait(?Send)]
pub trait SdkConnector {
    async fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn PlatformSdk>, SdkError>;
}
