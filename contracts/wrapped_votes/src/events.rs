use soroban_sdk::{contractevent, Address, BytesN, Env};

#[contractevent(topics = ["WrappedVotes", "INIT"])]
struct Initialized {
    owner: Address,
    underlying: Address,
}

#[contractevent(topics = ["WrappedVotes", "TRANSFER"])]
struct Transfer {
    from: Option<Address>,
    to: Option<Address>,
    amount: i128,
}

#[contractevent(topics = ["WrappedVotes", "APPROVAL"])]
struct Approval {
    owner: Address,
    spender: Address,
    amount: i128,
}

#[contractevent(topics = ["WrappedVotes", "WRAPPED"])]
struct Wrapped {
    from: Address,
    recipient: Address,
    amount: i128,
}

#[contractevent(topics = ["WrappedVotes", "UNWRAPPED"])]
struct Unwrapped {
    from: Address,
    recipient: Address,
    amount: i128,
}

#[contractevent(topics = ["WrappedVotes", "DELEGATE_CHANGED"])]
struct DelegateChanged {
    delegator: Address,
    from_delegate: Option<Address>,
    to_delegate: Option<Address>,
}

#[contractevent(topics = ["WrappedVotes", "VOTES_CHANGED"])]
struct DelegateVotesChanged {
    delegate: Address,
    previous_votes: i128,
    new_votes: i128,
}

#[contractevent(topics = ["WrappedVotes", "PERMIT_KEY"])]
struct PermitKeySet {
    owner: Address,
    public_key: BytesN<32>,
}

#[contractevent(topics = ["WrappedVotes", "OWNER"])]
struct OwnershipTransferred {
    previous_owner: Option<Address>,
    new_owner: Option<Address>,
}

pub fn emit_initialized(env: &Env, owner: &Address, underlying: &Address) {
    Initialized {
        owner: owner.clone(),
        underlying: underlying.clone(),
    }
    .publish(env);
}

pub fn emit_transfer(env: &Env, from: Option<Address>, to: Option<Address>, amount: i128) {
    Transfer { from, to, amount }.publish(env);
}

pub fn emit_approval(env: &Env, owner: &Address, spender: &Address, amount: i128) {
    Approval {
        owner: owner.clone(),
        spender: spender.clone(),
        amount,
    }
    .publish(env);
}

pub fn emit_wrapped(env: &Env, from: &Address, recipient: &Address, amount: i128) {
    Wrapped {
        from: from.clone(),
        recipient: recipient.clone(),
        amount,
    }
    .publish(env);
}

pub fn emit_unwrapped(env: &Env, from: &Address, recipient: &Address, amount: i128) {
    Unwrapped {
        from: from.clone(),
        recipient: recipient.clone(),
        amount,
    }
    .publish(env);
}

pub fn emit_delegate_changed(
    env: &Env,
    delegator: &Address,
    from_delegate: Option<Address>,
    to_delegate: Option<Address>,
) {
    DelegateChanged {
        delegator: delegator.clone(),
        from_delegate,
        to_delegate,
    }
    .publish(env);
}

pub fn emit_delegate_votes_changed(
    env: &Env,
    delegate: &Address,
    previous_votes: i128,
    new_votes: i128,
) {
    DelegateVotesChanged {
        delegate: delegate.clone(),
        previous_votes,
        new_votes,
    }
    .publish(env);
}

pub fn emit_permit_key_set(env: &Env, owner: &Address, public_key: &BytesN<32>) {
    PermitKeySet {
        owner: owner.clone(),
        public_key: public_key.clone(),
    }
    .publish(env);
}

pub fn emit_ownership_transferred(
    env: &Env,
    previous_owner: Option<Address>,
    new_owner: Option<Address>,
) {
    OwnershipTransferred {
        previous_owner,
        new_owner,
    }
    .publish(env);
}
