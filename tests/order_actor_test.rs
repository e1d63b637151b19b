use chrono::Utc;
use errand_exchange::clients::{OrderClient, RewardClient, UserClient};
use errand_exchange::codes::CodeGenerator;
use errand_exchange::config::ExchangeConfig;
use errand_exchange::framework::mock::MockClient;
use errand_exchange::framework::{
    ActorClient, FrameworkError, ResourceActor, ResourceClient, ResourceRequest,
};
use errand_exchange::model::{Order, OrderStatus, RewardAccount, User, UserCreate, UserId};
use errand_exchange::order_actor::{self, OrderError};
use errand_exchange::reward_actor::{RewardAction, RewardActionResult, RewardError};
use errand_exchange::user_actor::{self, UserError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

const REQUESTER: UserId = UserId(1);
const ACCEPTER: UserId = UserId(2);

fn profile(id: UserId, name: &str) -> User {
    User {
        id,
        email: format!("{}@campus.edu", name.to_lowercase()),
        name: name.to_string(),
        phone: "555-0101".to_string(),
        enrollment: "E1024".to_string(),
        hostel: "H3".to_string(),
        branch: "CSE".to_string(),
        year: "2".to_string(),
        created_at: Utc::now(),
    }
}

/// Real Order actor behind an order client whose User and Reward clients are mocked.
///
/// Pattern 2: Actor + Mocks
/// - Real Order actor (the lifecycle under test)
/// - Mocked dependencies, so ledger failures can be injected at any step
struct Harness {
    users: MockClient<User>,
    rewards: MockClient<RewardAccount>,
    orders: OrderClient,
    codes: CodeGenerator,
    handle: JoinHandle<()>,
}

impl Harness {
    fn start() -> Self {
        let users = MockClient::<User>::new();
        let rewards = MockClient::<RewardAccount>::new();
        let config = ExchangeConfig::default();

        let (actor, orders) = order_actor::new(
            &config,
            UserClient::new(users.client()),
            RewardClient::new(rewards.client(), config.signup_bonus),
        );
        let handle = tokio::spawn(actor.run(()));

        Self {
            users,
            rewards,
            orders,
            codes: CodeGenerator::seeded("#NBO", 21),
            handle,
        }
    }

    /// Scripts the balance check and the requester lookup, then places an order.
    async fn place_order(&mut self) -> Order {
        self.rewards
            .expect_action(REQUESTER)
            .when(|action| *action == RewardAction::Balance)
            .return_ok(RewardActionResult::Balance(50));
        self.users
            .expect_get(REQUESTER)
            .return_ok(Some(profile(REQUESTER, "Asha")));

        self.orders
            .create_order(&mut self.codes, "Canteen", "Two samosas", REQUESTER)
            .await
            .expect("Order creation failed")
    }

    fn expect_debit(&mut self, result: Result<i64, FrameworkError>) {
        let debit = self
            .rewards
            .expect_action(REQUESTER)
            .when(|action| *action == RewardAction::Adjust(-10));
        match result {
            Ok(coins) => debit.return_ok(RewardActionResult::Adjust(coins)),
            Err(e) => debit.return_err(e),
        }
    }

    fn expect_credit(&mut self, result: Result<i64, FrameworkError>) {
        let credit = self
            .rewards
            .expect_action(ACCEPTER)
            .when(|action| *action == RewardAction::Adjust(10));
        match result {
            Ok(coins) => credit.return_ok(RewardActionResult::Adjust(coins)),
            Err(e) => credit.return_err(e),
        }
    }

    async fn stored(&self, order: &Order) -> Order {
        self.orders
            .get(order.id)
            .await
            .unwrap()
            .expect("order stored")
    }

    async fn status(&self, order: &Order) -> OrderStatus {
        self.stored(order).await.status
    }

    async fn finish(self) {
        self.users.verify();
        self.rewards.verify();
        drop(self.orders);
        self.handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_order_actor_with_mocked_dependencies() {
    let mut h = Harness::start();

    let order = h.place_order().await;
    assert_eq!(order.requester_name, "Asha");
    assert_eq!(order.requester_phone, "555-0101");
    assert_eq!(order.status, OrderStatus::NotAccepted);
    let code = order.one_time_code.clone().unwrap();

    h.orders.accept_order(order.id, ACCEPTER).await.unwrap();

    h.expect_debit(Ok(40));
    h.expect_credit(Ok(60));
    let done = h.orders.complete_order(order.id, ACCEPTER, &code).await.unwrap();
    assert_eq!(done.status, OrderStatus::Completed);

    h.finish().await;
}

#[tokio::test]
async fn test_insufficient_balance_skips_lookup_and_stores_nothing() {
    let mut h = Harness::start();

    h.rewards
        .expect_action(REQUESTER)
        .return_ok(RewardActionResult::Balance(9));

    let err = h
        .orders
        .create_order(&mut h.codes, "Canteen", "Chai", REQUESTER)
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::InsufficientFunds { balance: 9, stake: 10 });
    assert!(h.orders.list_mine(REQUESTER).await.unwrap().is_empty());

    h.finish().await;
}

#[tokio::test]
async fn test_missing_requester_profile() {
    let mut h = Harness::start();

    h.rewards
        .expect_action(REQUESTER)
        .return_ok(RewardActionResult::Balance(50));
    h.users.expect_get(REQUESTER).return_ok(None);

    let err = h
        .orders
        .create_order(&mut h.codes, "Canteen", "Chai", REQUESTER)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::Requester(UserError::NotFound("user_1".into()))
    );

    h.finish().await;
}

#[tokio::test]
async fn test_refused_debit_releases_the_order() {
    let mut h = Harness::start();
    let order = h.place_order().await;
    let code = order.one_time_code.clone().unwrap();
    h.orders.accept_order(order.id, ACCEPTER).await.unwrap();

    h.expect_debit(Err(FrameworkError::NotFound("user_1".into())));
    let err = h
        .orders
        .complete_order(order.id, ACCEPTER, &code)
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::Ledger(RewardError::NotFound("user_1".into())));

    let stored = h.stored(&order).await;
    assert_eq!(stored.status, OrderStatus::Accepted);
    assert!(!stored.settling);

    // The ledger refused outright, so completing again is allowed
    h.expect_debit(Ok(40));
    h.expect_credit(Ok(60));
    h.orders.complete_order(order.id, ACCEPTER, &code).await.unwrap();
    assert_eq!(h.status(&order).await, OrderStatus::Completed);

    h.finish().await;
}

#[tokio::test]
async fn test_failed_credit_completes_and_reports_inconsistency() {
    let mut h = Harness::start();
    let order = h.place_order().await;
    let code = order.one_time_code.clone().unwrap();
    h.orders.accept_order(order.id, ACCEPTER).await.unwrap();

    h.expect_debit(Ok(40));
    h.expect_credit(Err(FrameworkError::ActorClosed));
    let err = h
        .orders
        .complete_order(order.id, ACCEPTER, &code)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::Inconsistent {
            order_id: order.id,
            from: REQUESTER,
            to: ACCEPTER,
            amount: 10,
        }
    );

    // Marked completed so a retry cannot debit the requester a second time
    assert_eq!(h.status(&order).await, OrderStatus::Completed);
    let retry = h
        .orders
        .complete_order(order.id, ACCEPTER, &code)
        .await
        .unwrap_err();
    assert!(matches!(retry, OrderError::WrongState { .. }));

    h.finish().await;
}

#[tokio::test]
async fn test_orders_cannot_be_deleted() {
    let mut h = Harness::start();
    let order = h.place_order().await;

    let err = h.orders.inner().delete(order.id).await.unwrap_err();
    assert_eq!(
        err.into_entity_error::<OrderError>().unwrap(),
        OrderError::Retained("order_1".into())
    );
    assert_eq!(h.status(&order).await, OrderStatus::NotAccepted);

    h.finish().await;
}

/// Real User, Reward and Order actors, with the order client reaching the ledger through
/// a relay that holds every `Adjust` for a while before passing it on.
struct SlowLedger {
    ledger: RewardClient,
    orders: OrderClient,
    codes: CodeGenerator,
    requester: UserId,
    accepter: UserId,
}

impl SlowLedger {
    async fn start(hold: Duration, ledger_deadline: Duration) -> Self {
        let config = ExchangeConfig::default();

        let (user_actor, users) = user_actor::new(&config);
        tokio::spawn(user_actor.run(()));
        let (reward_actor, direct) = ResourceActor::<RewardAccount>::new(16);
        tokio::spawn(reward_actor.run(()));
        let ledger = RewardClient::new(direct.clone(), config.signup_bonus);

        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<RewardAccount>>(16);
        tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let upstream = direct.clone();
                tokio::spawn(async move {
                    if let ResourceRequest::Action {
                        id,
                        action,
                        respond_to,
                    } = request
                    {
                        if matches!(action, RewardAction::Adjust(_)) {
                            sleep(hold).await;
                        }
                        let _ = respond_to.send(upstream.perform_action(id, action).await);
                    }
                });
            }
        });
        let relayed = RewardClient::new(
            ResourceClient::new(sender).with_deadline(ledger_deadline),
            config.signup_bonus,
        );

        let (order_actor, orders) = order_actor::new(&config, users.clone(), relayed);
        tokio::spawn(order_actor.run(()));

        let asha = users
            .create_user(UserCreate::new("asha@campus.edu", "Asha", "555-0101"))
            .await
            .unwrap();
        let ravi = users
            .create_user(UserCreate::new("ravi@campus.edu", "Ravi", "555-0102"))
            .await
            .unwrap();
        ledger.create_account(asha.id).await.unwrap();
        ledger.create_account(ravi.id).await.unwrap();

        Self {
            ledger,
            orders,
            codes: CodeGenerator::seeded("#NBO", 31),
            requester: asha.id,
            accepter: ravi.id,
        }
    }

    async fn accepted_order(&mut self) -> Order {
        let order = self
            .orders
            .create_order(&mut self.codes, "Canteen", "Two samosas", self.requester)
            .await
            .unwrap();
        self.orders
            .accept_order(order.id, self.accepter)
            .await
            .unwrap();
        order
    }
}

#[tokio::test]
async fn test_debit_landing_after_the_deadline_is_charged_once() {
    let mut s = SlowLedger::start(Duration::from_millis(200), Duration::from_millis(50)).await;
    let order = s.accepted_order().await;
    let code = order.one_time_code.clone().unwrap();

    let err = s
        .orders
        .complete_order(order.id, s.accepter, &code)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::Inconsistent {
            order_id: order.id,
            from: s.requester,
            to: s.accepter,
            amount: 10,
        }
    );
    let stored = s.orders.get(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Completed);
    assert!(!stored.settling);

    // The held debit still lands
    sleep(Duration::from_millis(300)).await;
    assert_eq!(s.ledger.balance(s.requester).await.unwrap(), 40);
    assert_eq!(s.ledger.balance(s.accepter).await.unwrap(), 50);

    // and a retry cannot take the stake a second time
    let retry = s
        .orders
        .complete_order(order.id, s.accepter, &code)
        .await
        .unwrap_err();
    assert!(matches!(
        retry,
        OrderError::WrongState {
            status: OrderStatus::Completed,
            ..
        }
    ));
    sleep(Duration::from_millis(300)).await;
    assert_eq!(s.ledger.balance(s.requester).await.unwrap(), 40);
}

#[tokio::test]
async fn test_settlement_does_not_hold_up_other_requests() {
    let mut s = SlowLedger::start(Duration::from_millis(400), Duration::from_secs(5)).await;
    let order = s.accepted_order().await;
    let code = order.one_time_code.clone().unwrap();

    let settling = {
        let (orders, code) = (s.orders.clone(), code.clone());
        let (order_id, accepter) = (order.id, s.accepter);
        tokio::spawn(async move { orders.complete_order(order_id, accepter, &code).await })
    };
    sleep(Duration::from_millis(50)).await;

    let quick = Duration::from_millis(200);
    let available = timeout(quick, s.orders.list_available(UserId(3)))
        .await
        .expect("list answered while another order settles")
        .unwrap();
    assert!(available.is_empty());

    timeout(
        quick,
        s.orders
            .create_order(&mut s.codes, "Stationery", "Pens", s.requester),
    )
    .await
    .expect("create answered while another order settles")
    .unwrap();

    // A second completion finds the claim instead of paying again
    let err = timeout(quick, s.orders.complete_order(order.id, s.accepter, &code))
        .await
        .expect("claim answered while another order settles")
        .unwrap_err();
    assert_eq!(err, OrderError::SettlementInProgress(order.id));

    let done = settling.await.unwrap().unwrap();
    assert_eq!(done.status, OrderStatus::Completed);
    assert_eq!(s.ledger.balance(s.requester).await.unwrap(), 40);
    assert_eq!(s.ledger.balance(s.accepter).await.unwrap(), 60);
    assert_eq!(s.ledger.total_supply().await.unwrap(), 100);
}
