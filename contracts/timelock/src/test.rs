#![cfg(test)]

use super::*;
use soroban_sdk::{
    contract, contractimpl, symbol_short,
    testutils::{Address as _, Ledger as _},
    vec, Address, BytesN, Env, IntoVal, Symbol, Vec,
};

// ============================================================================
// Call Target
// ============================================================================

#[contract]
pub struct Target;

#[contractimpl]
impl Target {
    pub fn set_value(env: Env, value: u32) {
        env.storage().instance().set(&symbol_short!("value"), &value);
    }

    pub fn value(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&symbol_short!("value"))
            .unwrap_or(0)
    }

    pub fn fail(_env: Env) {
        panic!("target call failed");
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

const MIN_DELAY: u64 = 86_400;
const START_TIME: u64 = 1_700_000_000;

struct TestContext<'a> {
    env: Env,
    timelock: TimelockClient<'a>,
    target: TargetClient<'a>,
    admin: Address,
    proposer: Address,
    executor: Address,
    outsider: Address,
}

fn create_test_env() -> Env {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START_TIME);
    env
}

fn setup<'a>() -> TestContext<'a> {
    let env = create_test_env();
    let admin = Address::generate(&env);
    let proposer = Address::generate(&env);
    let executor = Address::generate(&env);
    let outsider = Address::generate(&env);

    let timelock_id = env.register(Timelock, ());
    let timelock = TimelockClient::new(&env, &timelock_id);
    timelock.initialize(
        &MIN_DELAY,
        &vec![&env, proposer.clone()],
        &vec![&env, executor.clone()],
        &Some(admin.clone()),
    );

    let target_id = env.register(Target, ());
    let target = TargetClient::new(&env, &target_id);

    TestContext {
        env,
        timelock,
        target,
        admin,
        proposer,
        executor,
        outsider,
    }
}

fn salt(env: &Env, seed: u8) -> BytesN<32> {
    BytesN::from_array(env, &[seed; 32])
}

fn set_value_call(ctx: &TestContext, value: u32) -> Call {
    Call {
        target: ctx.target.address.clone(),
        function: Symbol::new(&ctx.env, "set_value"),
        args: vec![&ctx.env, value.into_val(&ctx.env)],
    }
}

fn failing_call(ctx: &TestContext) -> Call {
    Call {
        target: ctx.target.address.clone(),
        function: Symbol::new(&ctx.env, "fail"),
        args: Vec::new(&ctx.env),
    }
}

fn self_call(ctx: &TestContext, function: &str, args: Vec<soroban_sdk::Val>) -> Call {
    Call {
        target: ctx.timelock.address.clone(),
        function: Symbol::new(&ctx.env, function),
        args,
    }
}

fn advance_time(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| li.timestamp += seconds);
}

// ============================================================================
// Initialization Tests
// ============================================================================

#[test]
fn test_initialize_assigns_roles() {
    let ctx = setup();

    assert_eq!(ctx.timelock.get_min_delay(), MIN_DELAY);
    assert!(ctx.timelock.has_role(&Role::Admin, &ctx.timelock.address));
    assert!(ctx.timelock.has_role(&Role::Admin, &ctx.admin));
    assert!(ctx.timelock.has_role(&Role::Proposer, &ctx.proposer));
    assert!(ctx.timelock.has_role(&Role::Canceller, &ctx.proposer));
    assert!(ctx.timelock.has_role(&Role::Executor, &ctx.executor));
    assert!(!ctx.timelock.has_role(&Role::Executor, &ctx.proposer));
    assert_eq!(ctx.timelock.get_role_admin(&Role::Proposer), Role::Admin);
}

#[test]
fn test_initialize_twice_fails() {
    let ctx = setup();

    let result = ctx.timelock.try_initialize(
        &0,
        &Vec::new(&ctx.env),
        &Vec::new(&ctx.env),
        &None,
    );
    assert_eq!(result, Err(Ok(TimelockError::AlreadyInitialized)));
}

#[test]
fn test_uninitialized_schedule_fails() {
    let env = create_test_env();
    let caller = Address::generate(&env);
    let timelock = TimelockClient::new(&env, &env.register(Timelock, ()));

    let call = Call {
        target: Address::generate(&env),
        function: Symbol::new(&env, "noop"),
        args: Vec::new(&env),
    };
    let result = timelock.try_schedule(
        &caller,
        &vec![&env, call],
        &None,
        &salt(&env, 1),
        &MIN_DELAY,
    );
    assert_eq!(result, Err(Ok(TimelockError::NotInitialized)));
}

// ============================================================================
// Scheduling Tests
// ============================================================================

#[test]
fn test_execute_waits_for_delay() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 42)];
    let salt = salt(&ctx.env, 1);

    let id = ctx
        .timelock
        .schedule(&ctx.proposer, &calls, &None, &salt, &MIN_DELAY);
    assert_eq!(ctx.timelock.get_timestamp(&id), START_TIME + MIN_DELAY);
    assert_eq!(ctx.timelock.get_operation_state(&id), OperationState::Waiting);

    advance_time(&ctx.env, MIN_DELAY - 1);
    let result = ctx
        .timelock
        .try_execute(&ctx.executor, &calls, &None, &salt);
    assert_eq!(result, Err(Ok(TimelockError::NotReady)));

    advance_time(&ctx.env, 1);
    assert!(ctx.timelock.is_operation_ready(&id));
    ctx.timelock.execute(&ctx.executor, &calls, &None, &salt);

    assert_eq!(ctx.target.value(), 42);
    assert!(ctx.timelock.is_operation_done(&id));

    let result = ctx
        .timelock
        .try_execute(&ctx.executor, &calls, &None, &salt);
    assert_eq!(result, Err(Ok(TimelockError::AlreadyExecuted)));
}

#[test]
fn test_ready_exactly_at_scheduled_timestamp() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 7)];
    let salt = salt(&ctx.env, 2);

    let id = ctx
        .timelock
        .schedule(&ctx.proposer, &calls, &None, &salt, &86_400);
    assert_eq!(ctx.timelock.get_timestamp(&id), 1_700_086_400);

    ctx.env.ledger().set_timestamp(1_700_086_399);
    assert!(!ctx.timelock.is_operation_ready(&id));
    let result = ctx
        .timelock
        .try_execute(&ctx.executor, &calls, &None, &salt);
    assert_eq!(result, Err(Ok(TimelockError::NotReady)));

    ctx.env.ledger().set_timestamp(1_700_086_400);
    ctx.timelock.execute(&ctx.executor, &calls, &None, &salt);
    assert_eq!(ctx.target.value(), 7);

    // Longer delays than the minimum are honoured as given
    let calls = vec![&ctx.env, set_value_call(&ctx, 8)];
    let id = ctx
        .timelock
        .schedule(&ctx.proposer, &calls, &None, &salt, &172_800);
    assert_eq!(ctx.timelock.get_timestamp(&id), 1_700_086_400 + 172_800);

    ctx.env.ledger().set_timestamp(1_700_086_400 + 172_799);
    let result = ctx
        .timelock
        .try_execute(&ctx.executor, &calls, &None, &salt);
    assert_eq!(result, Err(Ok(TimelockError::NotReady)));
}

#[test]
fn test_schedule_returns_operation_hash() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 1)];

    let id = ctx
        .timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);

    assert_eq!(
        id,
        ctx.timelock.hash_operation(&calls, &None, &salt(&ctx.env, 1))
    );
    assert_ne!(
        id,
        ctx.timelock.hash_operation(&calls, &None, &salt(&ctx.env, 2))
    );
    assert_ne!(
        id,
        ctx.timelock
            .hash_operation(&calls, &Some(salt(&ctx.env, 9)), &salt(&ctx.env, 1))
    );

    let operation = ctx.timelock.get_operation(&id).unwrap();
    assert_eq!(operation.scheduled_at, START_TIME);
    assert_eq!(operation.ready_at, START_TIME + MIN_DELAY);
    assert!(!operation.executed);
}

#[test]
fn test_schedule_requires_proposer() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 1)];

    let result = ctx.timelock.try_schedule(
        &ctx.outsider,
        &calls,
        &None,
        &salt(&ctx.env, 1),
        &MIN_DELAY,
    );
    assert_eq!(result, Err(Ok(TimelockError::Unauthorized)));
}

#[test]
fn test_schedule_below_min_delay_fails() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 1)];

    let result = ctx.timelock.try_schedule(
        &ctx.proposer,
        &calls,
        &None,
        &salt(&ctx.env, 1),
        &(MIN_DELAY - 1),
    );
    assert_eq!(result, Err(Ok(TimelockError::DelayTooShort)));
}

#[test]
fn test_schedule_empty_batch_fails() {
    let ctx = setup();

    let result = ctx.timelock.try_schedule(
        &ctx.proposer,
        &Vec::new(&ctx.env),
        &None,
        &salt(&ctx.env, 1),
        &MIN_DELAY,
    );
    assert_eq!(result, Err(Ok(TimelockError::EmptyBatch)));
}

#[test]
fn test_schedule_same_operation_twice_fails() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 1)];

    ctx.timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    let result = ctx.timelock.try_schedule(
        &ctx.proposer,
        &calls,
        &None,
        &salt(&ctx.env, 1),
        &(MIN_DELAY * 2),
    );
    assert_eq!(result, Err(Ok(TimelockError::AlreadyScheduled)));

    // Same calls with a different salt are a different operation
    ctx.timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 2), &MIN_DELAY);
}

#[test]
fn test_reschedule_executed_operation_fails() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 5)];

    ctx.timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    advance_time(&ctx.env, MIN_DELAY);
    ctx.timelock
        .execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));

    let result = ctx.timelock.try_schedule(
        &ctx.proposer,
        &calls,
        &None,
        &salt(&ctx.env, 1),
        &MIN_DELAY,
    );
    assert_eq!(result, Err(Ok(TimelockError::AlreadyExecuted)));
}

// ============================================================================
// Execution Tests
// ============================================================================

#[test]
fn test_execute_requires_executor() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 1)];

    ctx.timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    advance_time(&ctx.env, MIN_DELAY);

    let result = ctx
        .timelock
        .try_execute(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1));
    assert_eq!(result, Err(Ok(TimelockError::Unauthorized)));
}

#[test]
fn test_execute_unscheduled_fails() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 1)];

    let result = ctx
        .timelock
        .try_execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));
    assert_eq!(result, Err(Ok(TimelockError::NotScheduled)));
}

#[test]
fn test_execute_runs_calls_in_order() {
    let ctx = setup();
    let calls = vec![
        &ctx.env,
        set_value_call(&ctx, 1),
        set_value_call(&ctx, 2),
        set_value_call(&ctx, 3),
    ];

    ctx.timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    advance_time(&ctx.env, MIN_DELAY);
    ctx.timelock
        .execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));

    assert_eq!(ctx.target.value(), 3);
}

#[test]
fn test_failing_call_reverts_whole_batch() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 7), failing_call(&ctx)];

    let id = ctx
        .timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    advance_time(&ctx.env, MIN_DELAY);

    let result = ctx
        .timelock
        .try_execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));
    assert_eq!(result, Err(Ok(TimelockError::CallReverted)));

    assert_eq!(ctx.target.value(), 0);
    assert_eq!(ctx.timelock.get_operation_state(&id), OperationState::Ready);
}

#[test]
fn test_predecessor_must_be_executed_first() {
    let ctx = setup();
    let first = vec![&ctx.env, set_value_call(&ctx, 1)];
    let second = vec![&ctx.env, set_value_call(&ctx, 2)];

    let first_id = ctx
        .timelock
        .schedule(&ctx.proposer, &first, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    let predecessor = Some(first_id.clone());
    ctx.timelock.schedule(
        &ctx.proposer,
        &second,
        &predecessor,
        &salt(&ctx.env, 1),
        &MIN_DELAY,
    );
    advance_time(&ctx.env, MIN_DELAY);

    let result = ctx.timelock.try_execute(
        &ctx.executor,
        &second,
        &predecessor,
        &salt(&ctx.env, 1),
    );
    assert_eq!(result, Err(Ok(TimelockError::PredecessorNotExecuted)));

    ctx.timelock
        .execute(&ctx.executor, &first, &None, &salt(&ctx.env, 1));
    ctx.timelock
        .execute(&ctx.executor, &second, &predecessor, &salt(&ctx.env, 1));
    assert_eq!(ctx.target.value(), 2);
}

// ============================================================================
// Cancellation Tests
// ============================================================================

#[test]
fn test_cancel_returns_operation_to_unset() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 1)];

    let id = ctx
        .timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    assert!(ctx.timelock.is_operation_pending(&id));

    ctx.timelock.cancel(&ctx.proposer, &id);
    assert_eq!(ctx.timelock.get_operation_state(&id), OperationState::Unset);
    assert!(!ctx.timelock.is_operation(&id));
    assert_eq!(ctx.timelock.get_timestamp(&id), 0);

    advance_time(&ctx.env, MIN_DELAY);
    let result = ctx
        .timelock
        .try_execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));
    assert_eq!(result, Err(Ok(TimelockError::NotScheduled)));

    // A cancelled operation can be scheduled again
    let again = ctx
        .timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    assert_eq!(again, id);
}

#[test]
fn test_cancel_requires_canceller() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 1)];

    let id = ctx
        .timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);

    let result = ctx.timelock.try_cancel(&ctx.executor, &id);
    assert_eq!(result, Err(Ok(TimelockError::Unauthorized)));
}

#[test]
fn test_cancel_unknown_or_executed_fails() {
    let ctx = setup();
    let calls = vec![&ctx.env, set_value_call(&ctx, 1)];

    let result = ctx.timelock.try_cancel(&ctx.proposer, &salt(&ctx.env, 9));
    assert_eq!(result, Err(Ok(TimelockError::NotScheduled)));

    let id = ctx
        .timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    advance_time(&ctx.env, MIN_DELAY);
    ctx.timelock
        .execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));

    let result = ctx.timelock.try_cancel(&ctx.proposer, &id);
    assert_eq!(result, Err(Ok(TimelockError::AlreadyExecuted)));
}

// ============================================================================
// Role Management Tests
// ============================================================================

#[test]
fn test_admin_grants_and_revokes_roles() {
    let ctx = setup();

    ctx.timelock
        .grant_role(&ctx.admin, &Role::Executor, &ctx.outsider);
    assert!(ctx.timelock.has_role(&Role::Executor, &ctx.outsider));

    ctx.timelock
        .revoke_role(&ctx.admin, &Role::Executor, &ctx.outsider);
    assert!(!ctx.timelock.has_role(&Role::Executor, &ctx.outsider));
}

#[test]
fn test_non_admin_cannot_grant_roles() {
    let ctx = setup();

    let result = ctx
        .timelock
        .try_grant_role(&ctx.proposer, &Role::Executor, &ctx.outsider);
    assert_eq!(result, Err(Ok(TimelockError::Unauthorized)));
}

#[test]
fn test_renounced_admin_loses_control() {
    let ctx = setup();

    ctx.timelock.renounce_role(&ctx.admin, &Role::Admin);
    assert!(!ctx.timelock.has_role(&Role::Admin, &ctx.admin));

    let result = ctx
        .timelock
        .try_grant_role(&ctx.admin, &Role::Proposer, &ctx.outsider);
    assert_eq!(result, Err(Ok(TimelockError::Unauthorized)));
}

#[test]
fn test_scheduled_role_grant_through_self_call() {
    let ctx = setup();
    ctx.timelock.renounce_role(&ctx.admin, &Role::Admin);

    let args = vec![
        &ctx.env,
        Role::Proposer.into_val(&ctx.env),
        ctx.outsider.into_val(&ctx.env),
    ];
    let calls = vec![&ctx.env, self_call(&ctx, "grant_role", args)];

    ctx.timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    advance_time(&ctx.env, MIN_DELAY);
    ctx.timelock
        .execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));

    assert!(ctx.timelock.has_role(&Role::Proposer, &ctx.outsider));
}

#[test]
fn test_scheduled_role_revocation_through_self_call() {
    let ctx = setup();

    let args = vec![
        &ctx.env,
        Role::Executor.into_val(&ctx.env),
        ctx.executor.into_val(&ctx.env),
    ];
    let calls = vec![&ctx.env, self_call(&ctx, "revoke_role", args)];

    ctx.timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    advance_time(&ctx.env, MIN_DELAY);
    ctx.timelock
        .execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));

    assert!(!ctx.timelock.has_role(&Role::Executor, &ctx.executor));
}

#[test]
fn test_update_delay_through_self_call() {
    let ctx = setup();
    let new_delay: u64 = 3_600;

    let args = vec![&ctx.env, new_delay.into_val(&ctx.env)];
    let calls = vec![&ctx.env, self_call(&ctx, "update_delay", args)];

    ctx.timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    advance_time(&ctx.env, MIN_DELAY);
    ctx.timelock
        .execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));

    assert_eq!(ctx.timelock.get_min_delay(), new_delay);

    // The shorter delay now applies to new operations
    let next = vec![&ctx.env, set_value_call(&ctx, 9)];
    ctx.timelock
        .schedule(&ctx.proposer, &next, &None, &salt(&ctx.env, 2), &new_delay);
}

#[test]
fn test_unknown_self_call_reverts() {
    let ctx = setup();

    let calls = vec![
        &ctx.env,
        self_call(&ctx, "cancel", Vec::new(&ctx.env)),
    ];

    ctx.timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    advance_time(&ctx.env, MIN_DELAY);

    let result = ctx
        .timelock
        .try_execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));
    assert_eq!(result, Err(Ok(TimelockError::UnsupportedSelfCall)));
}

#[test]
fn test_malformed_self_call_arguments_revert() {
    let ctx = setup();

    let args = vec![&ctx.env, ctx.outsider.into_val(&ctx.env)];
    let calls = vec![&ctx.env, self_call(&ctx, "update_delay", args)];

    ctx.timelock
        .schedule(&ctx.proposer, &calls, &None, &salt(&ctx.env, 1), &MIN_DELAY);
    advance_time(&ctx.env, MIN_DELAY);

    let result = ctx
        .timelock
        .try_execute(&ctx.executor, &calls, &None, &salt(&ctx.env, 1));
    assert_eq!(result, Err(Ok(TimelockError::UnsupportedSelfCall)));
    assert_eq!(ctx.timelock.get_min_delay(), MIN_DELAY);
}
