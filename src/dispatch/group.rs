//! Group operations

use crate::dispatch::handler_table;
use crate::sdk::api::{GroupActionsQuery, GroupMembersQuery, GroupMembershipFilter};

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

handler_table!(QUERIES, {
    "getGroupInfo" => get_group_info(ctx) {
        let contract_id = ctx.args.first_str(&["dataContractId", "contractId"])?;
        let position = ctx.args.u32_or("groupContractPosition", 0);
        Ok(ctx.sdk.group().info(contract_id, position, ctx.proof).await?)
    }
    "getGroupInfos" => get_group_infos(ctx) {
        let contract_id = ctx.args.first_str(&["dataContractId", "contractId"])?;
        let start_at_info = ctx.args.opt_value("startAtInfo");
        let count = ctx.args.opt_u32("count");
        Ok(ctx.sdk.group().infos(contract_id, start_at_info, count, ctx.proof).await?)
    }
    "getGroupMembers" => get_group_members(ctx) {
        let query = GroupMembersQuery {
            contract_id: ctx.args.first_str(&["dataContractId", "contractId"])?.to_string(),
            position: ctx.args.u32_or("groupContractPosition", 0),
            member_ids: non_empty(ctx.args.string_array("memberIds")),
            start_at: ctx.args.opt_str("startAt"),
            limit: ctx.args.opt_u32("limit"),
        };
        Ok(ctx.sdk.group().members(query, ctx.proof).await?)
    }
    "getGroupActions" => get_group_actions(ctx) {
        let query = GroupActionsQuery {
            contract_id: ctx.args.first_str(&["dataContractId", "contractId"])?.to_string(),
            position: ctx.args.u32_or("groupContractPosition", 0),
            status: ctx.args.str_of("status")?.to_string(),
            start_at_info: ctx.args.opt_value("startAtInfo"),
            count: ctx.args.opt_u32("count"),
        };
        Ok(ctx.sdk.group().actions(query, ctx.proof).await?)
    }
    "getGroupActionSigners" => get_group_action_signers(ctx) {
        let contract_id = ctx.args.first_str(&["dataContractId", "contractId"])?;
        let position = ctx.args.u32_or("groupContractPosition", 0);
        let status = ctx.args.str_of("status")?;
        let action_id = ctx.args.str_of("actionId")?;
        Ok(ctx
            .sdk
            .group()
            .action_signers(contract_id, position, status, action_id, ctx.proof)
            .await?)
    }
    "getIdentityGroups" => get_identity_groups(ctx) {
        let identity_id = ctx.args.str_of("identityId")?;
        let filter = GroupMembershipFilter {
            member_data_contracts: non_empty(ctx.args.string_array("memberDataContracts")),
            owner_data_contracts: non_empty(ctx.args.string_array("ownerDataContracts")),
            moderator_data_contracts: non_empty(ctx.args.string_array("moderatorDataContracts")),
        };
        Ok(ctx.sdk.group().identity_groups(identity_id, filter, ctx.proof).await?)
    }
    "getGroupsDataContracts" => get_groups_data_contracts(ctx) {
        let mut contract_ids = ctx.args.string_array("dataContractIds");
        if contract_ids.is_empty() {
            contract_ids = ctx.args.string_array("contractIds");
        }
        Ok(ctx.sdk.group().groups_data_contracts(&contract_ids, ctx.proof).await?)
    }
});
