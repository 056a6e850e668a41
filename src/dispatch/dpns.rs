//! DPNS name service operations

use crate::dispatch::handler_table;

handler_table!(QUERIES, {
    "getDpnsUsername" => get_dpns_username(ctx) {
        let identity_id = ctx.args.str_of("identityId")?;
        Ok(ctx.sdk.dpns().username(identity_id, ctx.proof).await?)
    }
    "getDpnsUsernames" => get_dpns_usernames(ctx) {
        let identity_id = ctx.args.str_of("identityId")?;
        let limit = ctx.args.opt_u32("limit");
        Ok(ctx.sdk.dpns().usernames(identity_id, limit, ctx.proof).await?)
    }
    "getDpnsUsernameByName" => get_dpns_username_by_name(ctx) {
        let username = ctx.args.str_of("username")?;
        Ok(ctx.sdk.dpns().username_by_name(username, ctx.proof).await?)
    }
    "dpnsResolve" => dpns_resolve(ctx) {
        let name = ctx.args.str_of("name")?;
        Ok(ctx.sdk.dpns().resolve_name(name).await?)
    }
    "dpnsCheckAvailability" => dpns_check_availability(ctx) {
        let label = ctx.args.str_of("label")?;
        Ok(ctx.sdk.dpns().is_name_available(label).await?)
    }
    "dpnsConvertToHomographSafe" => dpns_convert_to_homograph_safe(ctx) {
        let name = ctx.args.str_of("name")?;
        Ok(ctx.sdk.dpns().convert_to_homograph_safe(name).await?)
    }
    "dpnsIsValidUsername" => dpns_is_valid_username(ctx) {
        let label = ctx.args.str_of("label")?;
        Ok(ctx.sdk.dpns().is_valid_username(label).await?)
    }
    "dpnsIsContestedUsername" => dpns_is_contested_username(ctx) {
        let label = ctx.args.str_of("label")?;
        Ok(ctx.sdk.dpns().is_contested_username(label).await?)
    }
});
