//! Voting and contested-resource operations

use crate::dispatch::{handler_table, transition_success};
use crate::sdk::Signer;
use crate::sdk::api::{
    ContestedResourcesQuery, ContestedVotersQuery, IdentityVotesQuery, MasternodeVoteParams,
    VotePollsQuery, VoteStateQuery,
};

handler_table!(QUERIES, {
    "getContestedResources" => get_contested_resources(ctx) {
        let query = ContestedResourcesQuery {
            contract_id: ctx.args.first_str(&["dataContractId", "contractId"])?.to_string(),
            document_type_name: ctx.args.str_of("documentTypeName")?.to_string(),
            index_name: ctx.args.str_of("indexName")?.to_string(),
            start_at_value: ctx.args.opt_value("startAtValue"),
            limit: ctx.args.opt_u32("limit"),
            order_ascending: ctx.args.opt_bool("orderAscending"),
        };
        Ok(ctx.sdk.voting().contested_resources(query, ctx.proof).await?)
    }
    "getContestedResourceVotersForIdentity" => get_contested_resource_voters_for_identity(ctx) {
        let query = ContestedVotersQuery {
            contract_id: ctx.args.first_str(&["dataContractId", "contractId"])?.to_string(),
            document_type_name: ctx.args.str_of("documentTypeName")?.to_string(),
            index_name: ctx.args.str_of("indexName")?.to_string(),
            index_values: ctx.args.string_array("indexValues"),
            contestant_id: ctx.args.str_of("contestantId")?.to_string(),
            start_at: ctx.args.opt_value("startAtIdentifierInfo"),
            limit: ctx.args.opt_u32("limit"),
            order_ascending: ctx.args.opt_bool("orderAscending"),
        };
        Ok(ctx
            .sdk
            .voting()
            .contested_resource_voters_for_identity(query, ctx.proof)
            .await?)
    }
    "getContestedResourceVoteState" => get_contested_resource_vote_state(ctx) {
        let query = VoteStateQuery {
            contract_id: ctx.args.first_str(&["dataContractId", "contractId"])?.to_string(),
            document_type_name: ctx.args.str_of("documentTypeName")?.to_string(),
            index_name: ctx.args.str_of("indexName")?.to_string(),
            index_values: ctx.args.string_array("indexValues"),
            result_type: ctx.args.opt_str("resultType"),
            allow_include_locked_and_abstaining_vote_tally: ctx
                .args
                .opt_bool("allowIncludeLockedAndAbstainingVoteTally"),
            start_at_identifier_info: ctx.args.opt_value("startAtIdentifierInfo"),
            count: ctx.args.opt_u32("count"),
            order_ascending: ctx.args.opt_bool("orderAscending"),
        };
        Ok(ctx.sdk.voting().contested_resource_vote_state(query, ctx.proof).await?)
    }
    "getContestedResourceIdentityVotes" => get_contested_resource_identity_votes(ctx) {
        let query = IdentityVotesQuery {
            identity_id: ctx.args.str_of("identityId")?.to_string(),
            limit: ctx.args.opt_u32("limit"),
            offset: ctx.args.opt_u32("offset"),
            start_at_vote_poll_id_info: ctx.args.opt_value("startAtVotePollIdInfo"),
            order_ascending: ctx.args.opt_bool("orderAscending"),
        };
        Ok(ctx
            .sdk
            .voting()
            .contested_resource_identity_votes(query, ctx.proof)
            .await?)
    }
    "getVotePollsByEndDate" => get_vote_polls_by_end_date(ctx) {
        let query = VotePollsQuery {
            start_time_ms: ctx.args.opt_u64("startTimeMs"),
            end_time_ms: ctx.args.opt_u64("endTimeMs"),
            limit: ctx.args.opt_u32("limit"),
            offset: ctx.args.opt_u32("offset"),
            order_ascending: ctx.args.opt_bool("orderAscending"),
        };
        Ok(ctx.sdk.voting().vote_polls_by_end_date(query, ctx.proof).await?)
    }
});

handler_table!(TRANSITIONS, {
    "masternodeVote" => masternode_vote(ctx) {
        let signer = Signer::from_wif(ctx.args.str_of("votingKeyWif")?)?;
        let params = MasternodeVoteParams {
            pro_tx_hash: ctx.args.str_of("masternodeProTxHash")?.to_string(),
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            document_type_name: ctx.args.str_of("documentTypeName")?.to_string(),
            index_name: ctx.args.str_of("indexName")?.to_string(),
            index_values: ctx.args.string_array("indexValues"),
            vote_choice: ctx.args.str_of("voteChoice")?.to_string(),
        };
        let response = ctx.sdk.voting().masternode_vote(params, &signer).await?;
        Ok(transition_success("Vote submitted", response))
    }
});
